//! Sheet renderer: writes a dataset plus one barcode column into a workbook.

use barcodekit_frame::{
    COL_BARCODE, EnumCellValue, RenderError, Result, derive_cell_value, derive_column_names,
    select_identifiers,
};
use barcodekit_symbol::{encode_png, encode_text};
use polars::prelude::{Column, DataFrame};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Image, Workbook, Worksheet, XlsxError};

use crate::spec::{
    EnumSheetBarcodeMode, SpecBarcodeImagePlacement, SpecCellFormat, SpecSheetArtifact,
    SpecSheetRenderOptions, SpecSheetReport,
};
use crate::util::{
    calculate_column_width, cast_col_num, cast_row_num, estimate_width_len, sanitize_sheet_name,
    validate_sheet_bounds,
};

/// Render `df` into a single-sheet workbook with one barcode per data row.
///
/// - [`EnumSheetBarcodeMode::Image`]: a `"Barcode"` column is appended after
///   the last data column and one PNG is anchored per data row.
/// - [`EnumSheetBarcodeMode::Text`]: a `"Barcode"` text column is
///   materialized first and written like any other column.
///
/// Every identifier is encoded before the workbook is touched, so an
/// encoding failure never yields a partial workbook.
pub fn render_sheet(
    df: &DataFrame,
    mode: EnumSheetBarcodeMode,
    options: &SpecSheetRenderOptions,
) -> Result<SpecSheetArtifact> {
    let l_identifiers = select_identifiers(df)?;
    let mut report = SpecSheetReport::default();

    let (df_out, l_barcode_images) = match mode {
        EnumSheetBarcodeMode::Text => (
            derive_dataframe_with_barcode_text(df, &l_identifiers, &mut report)?,
            vec![],
        ),
        EnumSheetBarcodeMode::Image => (
            df.clone(),
            derive_barcode_images(&l_identifiers, options)?,
        ),
    };

    let n_width_data = df_out.width();
    let n_height_data = df_out.height();
    let n_width_total = n_width_data + usize::from(mode == EnumSheetBarcodeMode::Image);
    validate_sheet_bounds(n_height_data, n_width_total)?;

    let c_sheet_name_raw = options
        .sheet_name
        .as_deref()
        .unwrap_or_else(|| mode.sheet_name());
    let c_sheet_name = sanitize_sheet_name(c_sheet_name_raw, "_");
    if c_sheet_name != c_sheet_name_raw {
        report.warn(format!(
            "Sheet name {c_sheet_name_raw:?} normalized to {c_sheet_name:?}."
        ));
    }

    tracing::info!(
        ?mode,
        sheet = %c_sheet_name,
        n_rows = n_height_data,
        n_cols = n_width_total,
        "rendering sheet"
    );

    let fmt_header = derive_rust_xlsx_format(&options.formats.header);
    let fmt_text = derive_rust_xlsx_format(&options.formats.text);
    let fmt_number = derive_rust_xlsx_format(&options.formats.number);

    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&c_sheet_name)
            .map_err(derive_xlsx_error)?;

        let mut l_header = derive_column_names(&df_out);
        if mode == EnumSheetBarcodeMode::Image {
            l_header.push(COL_BARCODE.to_string());
        }
        write_header(worksheet, &l_header, &fmt_header)?;

        let mut l_width_by_col_body = vec![0usize; n_width_data];
        for (n_idx_col, col) in df_out.get_columns().iter().enumerate() {
            for n_idx_row in 0..n_height_data {
                let value = derive_cell_value(col, n_idx_row)?;
                l_width_by_col_body[n_idx_col] =
                    usize::max(l_width_by_col_body[n_idx_col], estimate_width_len(&value));

                let fmt_cell = match value {
                    EnumCellValue::Number(_) => &fmt_number,
                    _ => &fmt_text,
                };
                write_cell_with_format(worksheet, n_idx_row + 1, n_idx_col, &value, fmt_cell)?;
            }
        }

        for n_idx_col in 0..n_width_data {
            let n_width_header = estimate_width_len(&EnumCellValue::String(l_header[n_idx_col].clone()));
            if let Some(n_width) = calculate_column_width(
                n_width_header,
                l_width_by_col_body[n_idx_col],
                &options.policy_autofit,
            ) {
                worksheet
                    .set_column_width(cast_col_num(n_idx_col)?, n_width as f64)
                    .map_err(derive_xlsx_error)?;
            }
        }

        if mode == EnumSheetBarcodeMode::Image {
            insert_barcode_images(
                worksheet,
                n_width_data,
                &l_barcode_images,
                &options.placement,
            )?;
        }

        if options.if_freeze_header {
            worksheet.set_freeze_panes(1, 0).map_err(derive_xlsx_error)?;
        }
    }

    let bytes = workbook.save_to_buffer().map_err(derive_xlsx_error)?;

    report.sheet_name = c_sheet_name;
    report.n_rows_data = n_height_data;
    report.n_cols = n_width_total;
    tracing::info!(n_bytes = bytes.len(), "sheet rendered");

    Ok(SpecSheetArtifact { bytes, report })
}

fn derive_dataframe_with_barcode_text(
    df: &DataFrame,
    identifiers: &[String],
    report: &mut SpecSheetReport,
) -> Result<DataFrame> {
    if df.get_column_names_str().contains(&COL_BARCODE) {
        report.warn(format!(
            "Input column {COL_BARCODE:?} replaced by generated barcode text."
        ));
    }

    let l_texts: Vec<String> = identifiers.iter().map(|c_id| encode_text(c_id)).collect();
    let mut df_out = df.clone();
    df_out.with_column(Column::new(COL_BARCODE.into(), l_texts))?;
    Ok(df_out)
}

fn derive_barcode_images(
    identifiers: &[String],
    options: &SpecSheetRenderOptions,
) -> Result<Vec<Image>> {
    let placement = &options.placement;
    identifiers
        .iter()
        .enumerate()
        .map(|(n_idx_row, c_id)| {
            let v_png = encode_png(c_id, &options.raster).map_err(|source| {
                RenderError::Encoding {
                    row_idx: n_idx_row,
                    source,
                }
            })?;
            let image = Image::new_from_buffer(&v_png).map_err(derive_xlsx_error)?;
            let n_scale_width = f64::from(placement.width_px) / image.width();
            let n_scale_height = f64::from(placement.height_px) / image.height();
            Ok(image
                .set_scale_width(n_scale_width)
                .set_scale_height(n_scale_height))
        })
        .collect()
}

fn insert_barcode_images(
    worksheet: &mut Worksheet,
    col_idx: usize,
    images: &[Image],
    placement: &SpecBarcodeImagePlacement,
) -> Result<()> {
    let n_col = cast_col_num(col_idx)?;
    worksheet
        .set_column_width(n_col, placement.width_column)
        .map_err(derive_xlsx_error)?;

    for (n_idx_row, image) in images.iter().enumerate() {
        let n_row = cast_row_num(n_idx_row + 1)?;
        worksheet
            .set_row_height(n_row, placement.height_row)
            .map_err(derive_xlsx_error)?;
        worksheet
            .insert_image(n_row, n_col, image)
            .map_err(derive_xlsx_error)?;
    }
    Ok(())
}

fn write_header(worksheet: &mut Worksheet, header: &[String], fmt_header: &Format) -> Result<()> {
    for (col_idx, cell_value) in header.iter().enumerate() {
        worksheet
            .write_string_with_format(0, cast_col_num(col_idx)?, cell_value, fmt_header)
            .map_err(derive_xlsx_error)?;
    }
    Ok(())
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<()> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;
    match value {
        EnumCellValue::None => {
            worksheet
                .write_blank(n_row, n_col, format)
                .map_err(derive_xlsx_error)?;
        }
        EnumCellValue::String(val) => {
            worksheet
                .write_string_with_format(n_row, n_col, val, format)
                .map_err(derive_xlsx_error)?;
        }
        EnumCellValue::Number(val) => {
            worksheet
                .write_number_with_format(n_row, n_col, *val, format)
                .map_err(derive_xlsx_error)?;
        }
    }
    Ok(())
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if spec.italic.unwrap_or(false) {
        format = format.set_italic();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if let Some(val) = spec.bottom {
        format = format.set_border_bottom(derive_format_border(val));
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

fn derive_xlsx_error(err: XlsxError) -> RenderError {
    RenderError::Xlsx(err.to_string())
}
