//! Pure pagination planner: dataset plus layout in, positioned draw ops out.

use barcodekit_frame::{
    EnumCellValue, RenderError, Result, derive_cell_value, format_cell_text, format_number_text,
    select_identifiers,
};
use barcodekit_symbol::{SpecBarcodeModules, encode_modules};
use polars::prelude::{Column, DataFrame};

use crate::conf::{MM_PER_PT, N_HELVETICA_WIDTH_DEFAULT, TUP_HELVETICA_WIDTHS};
use crate::spec::{
    EnumPdfColumnKind, EnumPdfDrawOp, EnumPdfFont, SpecPageLayout, SpecPdfBarcodeStyle,
    SpecPdfLayoutPlan, SpecPdfPage,
};

// Float slack for capacity division (e.g. 80.0 / 20.0 landing just below 4).
const N_EPS_ROWS: f32 = 1e-4;

////////////////////////////////////////////////////////////////////////////////
// #region LayoutValidation

/// Row capacity per page, header row included.
///
/// Capacity below one is a [`RenderError::PageConfig`].
pub fn calculate_rows_per_page(layout: &SpecPageLayout) -> Result<usize> {
    if !(layout.line_height_mm.is_finite() && layout.line_height_mm > 0.0) {
        return Err(RenderError::PageConfig {
            message: format!("line height must be positive, got {} mm", layout.line_height_mm),
        });
    }
    let n_usable_mm = layout.page_height_mm - 2.0 * layout.y_margin_mm;
    let n_rows = (n_usable_mm / layout.line_height_mm + N_EPS_ROWS).floor();
    if !n_rows.is_finite() || n_rows < 1.0 {
        return Err(RenderError::PageConfig {
            message: format!(
                "page height {} mm with margin {} mm fits no {} mm row",
                layout.page_height_mm, layout.y_margin_mm, layout.line_height_mm
            ),
        });
    }
    Ok(n_rows as usize)
}

/// Column offsets must be non-decreasing in draw order; the barcode column is exempt.
pub fn validate_column_offsets(layout: &SpecPageLayout) -> Result<()> {
    let mut n_offset_prev = f32::NEG_INFINITY;
    let mut c_key_prev = "";
    for column in &layout.columns {
        if column.kind == EnumPdfColumnKind::Barcode {
            continue;
        }
        if !column.x_offset_mm.is_finite() || column.x_offset_mm < n_offset_prev {
            return Err(RenderError::PageConfig {
                message: format!(
                    "column {:?} at {} mm lies left of {:?} at {} mm",
                    column.key, column.x_offset_mm, c_key_prev, n_offset_prev
                ),
            });
        }
        n_offset_prev = column.x_offset_mm;
        c_key_prev = column.key.as_str();
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TextMetrics

/// Helvetica advance width of `text` in millimetres.
pub fn estimate_text_width_mm(text: &str, size_pt: f32) -> f32 {
    let n_units: u32 = text
        .chars()
        .map(|chr| {
            let n_code = chr as u32;
            if (0x20..=0x7E).contains(&n_code) {
                TUP_HELVETICA_WIDTHS[(n_code - 0x20) as usize] as u32
            } else {
                N_HELVETICA_WIDTH_DEFAULT as u32
            }
        })
        .sum();
    n_units as f32 / 1000.0 * size_pt * MM_PER_PT
}

/// Cell text for a numeric column: fixed decimals when configured.
///
/// Numeric text (`"12.5"`) is formatted like a number; other text is kept.
pub fn format_number_cell(value: &EnumCellValue, n_decimals: Option<usize>) -> String {
    match (value.as_f64(), n_decimals) {
        (Some(n), Some(n_dec)) if n.is_finite() => format!("{n:.n_dec$}"),
        (Some(n), None) if matches!(value, EnumCellValue::Number(_)) => format_number_text(n),
        _ => format_cell_text(value),
    }
}

fn truncate_chars(text: String, n_chars_max: Option<usize>) -> String {
    match n_chars_max {
        Some(n_max) if text.chars().count() > n_max => text.chars().take(n_max).collect(),
        _ => text,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Planner

/// Lay the dataset out on pages.
///
/// Every identifier is encoded before the first op is placed, so an
/// encoding failure aborts without a partial plan.
pub fn plan_pdf_pages(df: &DataFrame, layout: &SpecPageLayout) -> Result<SpecPdfLayoutPlan> {
    let n_rows_per_page = calculate_rows_per_page(layout)?;
    validate_column_offsets(layout)?;

    let l_identifiers = select_identifiers(df)?;
    let l_symbols = l_identifiers
        .iter()
        .enumerate()
        .map(|(n_idx_row, c_identifier)| {
            encode_modules(c_identifier).map_err(|source| RenderError::Encoding {
                row_idx: n_idx_row,
                source,
            })
        })
        .collect::<Result<Vec<SpecBarcodeModules>>>()?;

    let mut l_warnings = Vec::new();
    let l_columns_data: Vec<Option<&Column>> = layout
        .columns
        .iter()
        .map(|column| {
            if column.kind == EnumPdfColumnKind::Barcode {
                return None;
            }
            let col = df.column(&column.key).ok();
            if col.is_none() {
                let c_warning = format!("Column {:?} not found; drawn blank.", column.key);
                tracing::warn!(column = %column.key, "pdf column missing from dataset");
                l_warnings.push(c_warning);
            }
            col
        })
        .collect();

    let n_y_top = layout.page_height_mm - layout.y_margin_mm;
    let mut l_pages: Vec<SpecPdfPage> = Vec::new();
    let mut page = SpecPdfPage::default();
    let mut n_y = n_y_top;
    let mut n_row_count = 0usize;

    push_header_ops(&mut page, layout, n_y);
    n_y -= layout.line_height_mm;
    n_row_count += 1;

    for (n_idx_row, symbol) in l_symbols.iter().enumerate() {
        if n_row_count >= n_rows_per_page {
            l_pages.push(std::mem::take(&mut page));
            tracing::debug!(
                n_page = l_pages.len() + 1,
                n_idx_row,
                "pdf page break"
            );
            n_y = n_y_top;
            push_header_ops(&mut page, layout, n_y);
            n_y -= layout.line_height_mm;
            n_row_count = 1;
        }

        for (column, col_data) in layout.columns.iter().zip(&l_columns_data) {
            let n_x = layout.x_margin_mm + column.x_offset_mm;
            match &column.kind {
                EnumPdfColumnKind::Barcode => {
                    page.ops.push(derive_bars_op(symbol, n_x, n_y, &layout.barcode));
                }
                EnumPdfColumnKind::Text { n_chars_max } => {
                    let Some(col) = col_data else { continue };
                    let c_text = truncate_chars(
                        format_cell_text(&derive_cell_value(col, n_idx_row)?),
                        *n_chars_max,
                    );
                    push_text_op(&mut page, n_x, n_y, c_text, EnumPdfFont::Regular, layout.font_size_body_pt);
                }
                EnumPdfColumnKind::Number { n_decimals } => {
                    let Some(col) = col_data else { continue };
                    let c_text = format_number_cell(&derive_cell_value(col, n_idx_row)?, *n_decimals);
                    let n_x_right = n_x + layout.numeric_pad_pt * MM_PER_PT;
                    let n_x_text = n_x_right - estimate_text_width_mm(&c_text, layout.font_size_body_pt);
                    push_text_op(&mut page, n_x_text, n_y, c_text, EnumPdfFont::Regular, layout.font_size_body_pt);
                }
            }
        }

        page.n_rows_data += 1;
        n_y -= layout.line_height_mm;
        n_row_count += 1;
    }
    l_pages.push(page);

    Ok(SpecPdfLayoutPlan {
        rows_per_page: n_rows_per_page,
        pages: l_pages,
        warnings: l_warnings,
    })
}

fn push_header_ops(page: &mut SpecPdfPage, layout: &SpecPageLayout, n_y: f32) {
    for column in &layout.columns {
        push_text_op(
            page,
            layout.x_margin_mm + column.x_offset_mm,
            n_y,
            column.key.clone(),
            EnumPdfFont::Bold,
            layout.font_size_header_pt,
        );
    }
}

fn push_text_op(
    page: &mut SpecPdfPage,
    x_mm: f32,
    y_mm: f32,
    text: String,
    font: EnumPdfFont,
    size_pt: f32,
) {
    if text.is_empty() {
        return;
    }
    page.ops.push(EnumPdfDrawOp::Text {
        x_mm,
        y_mm,
        text,
        font,
        size_pt,
    });
}

fn derive_bars_op(
    symbol: &SpecBarcodeModules,
    n_x: f32,
    n_y: f32,
    style: &SpecPdfBarcodeStyle,
) -> EnumPdfDrawOp {
    let n_module_mm = style.module_width_pt * MM_PER_PT;
    let n_x_start = n_x + style.n_quiet_modules as f32 * n_module_mm;
    EnumPdfDrawOp::Bars {
        y_mm: n_y - style.nudge_pt * MM_PER_PT,
        height_mm: style.bar_height_mm,
        bars: symbol
            .bars()
            .into_iter()
            .map(|(n_start, n_len)| {
                (
                    n_x_start + n_start as f32 * n_module_mm,
                    n_len as f32 * n_module_mm,
                )
            })
            .collect(),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use barcodekit_frame::COL_BARCODE;
    use barcodekit_symbol::ErrorSymbol;

    use super::*;
    use crate::conf::derive_pdf_layout_portrait;
    use crate::spec::SpecPdfColumn;

    fn build_small_layout() -> SpecPageLayout {
        SpecPageLayout {
            page_height_mm: 100.0,
            y_margin_mm: 10.0,
            line_height_mm: 20.0,
            columns: vec![
                SpecPdfColumn::text("Art-Nr", 0.0, None),
                SpecPdfColumn::text("Art-Bez", 20.0, Some(4)),
                SpecPdfColumn::number("Wert", 60.0, Some(2)),
                SpecPdfColumn::barcode(COL_BARCODE, 80.0),
            ],
            ..derive_pdf_layout_portrait()
        }
    }

    fn build_dataset(n_rows: usize) -> DataFrame {
        let l_ids: Vec<String> = (0..n_rows).map(|n| format!("{}", 100000 + n)).collect();
        let l_names: Vec<String> = (0..n_rows).map(|n| format!("Artikel {n}")).collect();
        let l_values: Vec<f64> = (0..n_rows).map(|n| n as f64 * 1.5).collect();
        DataFrame::new(vec![
            Column::new("Art-Nr".into(), l_ids),
            Column::new("Art-Bez".into(), l_names),
            Column::new("Wert".into(), l_values),
        ])
        .expect("dataset")
    }

    #[test]
    fn test_calculate_rows_per_page() {
        assert_eq!(calculate_rows_per_page(&build_small_layout()).expect("rows"), 4);
        assert_eq!(calculate_rows_per_page(&derive_pdf_layout_portrait()).expect("rows"), 14);

        let layout_tight = SpecPageLayout {
            page_height_mm: 30.0,
            ..build_small_layout()
        };
        let err = calculate_rows_per_page(&layout_tight).expect_err("must fail");
        assert!(matches!(err, RenderError::PageConfig { .. }));
    }

    #[test]
    fn test_plan_splits_rows_across_pages() {
        let plan = plan_pdf_pages(&build_dataset(9), &build_small_layout()).expect("plan");

        assert_eq!(plan.rows_per_page, 4);
        assert_eq!(plan.pages.len(), 3);
        assert_eq!(
            plan.pages.iter().map(|page| page.n_rows_data).collect::<Vec<_>>(),
            vec![3, 3, 3]
        );
        assert_eq!(plan.n_rows_data(), 9);
    }

    #[test]
    fn test_plan_page_count_formula() {
        let layout = build_small_layout();
        for n_rows in [1usize, 2, 3, 4, 7, 10] {
            let plan = plan_pdf_pages(&build_dataset(n_rows), &layout).expect("plan");
            assert_eq!(plan.pages.len(), n_rows.div_ceil(3), "rows={n_rows}");
        }
    }

    #[test]
    fn test_plan_single_row_capacity_starts_header_only() {
        let layout = SpecPageLayout {
            page_height_mm: 40.0,
            ..build_small_layout()
        };
        assert_eq!(calculate_rows_per_page(&layout).expect("rows"), 1);

        let plan = plan_pdf_pages(&build_dataset(2), &layout).expect("plan");
        assert_eq!(
            plan.pages.iter().map(|page| page.n_rows_data).collect::<Vec<_>>(),
            vec![0, 1, 1]
        );
    }

    #[test]
    fn test_plan_redraws_header_on_every_page() {
        let plan = plan_pdf_pages(&build_dataset(5), &build_small_layout()).expect("plan");
        for page in &plan.pages {
            assert_eq!(
                page.texts(EnumPdfFont::Bold),
                vec!["Art-Nr", "Art-Bez", "Wert", "Barcode"]
            );
        }
        assert!(matches!(
            plan.pages[1].ops.first(),
            Some(EnumPdfDrawOp::Text { y_mm, .. }) if (*y_mm - 90.0).abs() < 1e-4
        ));
    }

    #[test]
    fn test_plan_empty_dataset_is_header_only() {
        let plan = plan_pdf_pages(&build_dataset(0), &build_small_layout()).expect("plan");
        assert_eq!(plan.pages.len(), 1);
        assert_eq!(plan.pages[0].n_rows_data, 0);
        assert_eq!(plan.pages[0].ops.len(), 4);
    }

    #[test]
    fn test_plan_formats_and_truncates_cells() {
        let plan = plan_pdf_pages(&build_dataset(2), &build_small_layout()).expect("plan");
        assert_eq!(
            plan.pages[0].texts(EnumPdfFont::Regular),
            vec!["100000", "Arti", "0.00", "100001", "Arti", "1.50"]
        );
    }

    #[test]
    fn test_plan_right_aligns_numbers() {
        let layout = build_small_layout();
        let plan = plan_pdf_pages(&build_dataset(2), &layout).expect("plan");
        let n_right = layout.x_margin_mm + 60.0 + layout.numeric_pad_pt * MM_PER_PT;
        let l_edges: Vec<f32> = plan.pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                EnumPdfDrawOp::Text { x_mm, text, font: EnumPdfFont::Regular, size_pt, .. }
                    if text.contains('.') =>
                {
                    Some(x_mm + estimate_text_width_mm(text, *size_pt))
                }
                _ => None,
            })
            .collect();
        assert_eq!(l_edges.len(), 2);
        assert!(l_edges.iter().all(|n| (n - n_right).abs() < 1e-3));
    }

    #[test]
    fn test_plan_places_bars_below_baseline() {
        let layout = build_small_layout();
        let plan = plan_pdf_pages(&build_dataset(1), &layout).expect("plan");
        let Some(EnumPdfDrawOp::Bars { y_mm, height_mm, bars }) = plan.pages[0]
            .ops
            .iter()
            .find(|op| matches!(op, EnumPdfDrawOp::Bars { .. }))
        else {
            panic!("bars op missing");
        };
        let n_baseline = 90.0 - 20.0;
        assert!((y_mm - (n_baseline - layout.barcode.nudge_pt * MM_PER_PT)).abs() < 1e-4);
        assert_eq!(*height_mm, layout.barcode.bar_height_mm);

        let n_module_mm = layout.barcode.module_width_pt * MM_PER_PT;
        let n_x_first = layout.x_margin_mm + 80.0 + 10.0 * n_module_mm;
        assert!((bars[0].0 - n_x_first).abs() < 1e-4);
        assert!((bars[0].1 - 2.0 * n_module_mm).abs() < 1e-4);
    }

    #[test]
    fn test_plan_missing_text_column_warns() {
        let df = DataFrame::new(vec![Column::new("Art-Nr".into(), &["A1", "B2"])]).expect("dataset");
        let plan = plan_pdf_pages(&df, &build_small_layout()).expect("plan");
        assert_eq!(plan.warnings.len(), 2);
        assert_eq!(plan.pages[0].texts(EnumPdfFont::Regular), vec!["A1", "B2"]);
    }

    #[test]
    fn test_plan_missing_identifier_column() {
        let df = DataFrame::new(vec![Column::new("Markt".into(), &["0815"])]).expect("dataset");
        let err = plan_pdf_pages(&df, &build_small_layout()).expect_err("must fail");
        assert!(matches!(err, RenderError::MissingColumn { column } if column == "Art-Nr"));
    }

    #[test]
    fn test_plan_reports_encoding_row() {
        let df = DataFrame::new(vec![Column::new("Art-Nr".into(), &["A1", "Grün"])]).expect("dataset");
        let err = plan_pdf_pages(&df, &build_small_layout()).expect_err("must fail");
        assert!(matches!(
            err,
            RenderError::Encoding {
                row_idx: 1,
                source: ErrorSymbol::UnsupportedChar { ch: 'ü', .. }
            }
        ));
    }

    #[test]
    fn test_validate_column_offsets() {
        assert!(validate_column_offsets(&derive_pdf_layout_portrait()).is_ok());

        let layout = SpecPageLayout {
            columns: vec![
                SpecPdfColumn::text("Art-Nr", 20.0, None),
                SpecPdfColumn::barcode(COL_BARCODE, 0.0),
                SpecPdfColumn::text("Markt", 10.0, None),
            ],
            ..build_small_layout()
        };
        let err = plan_pdf_pages(&build_dataset(1), &layout).expect_err("must fail");
        assert!(matches!(err, RenderError::PageConfig { .. }));
    }

    #[test]
    fn test_format_number_cell() {
        assert_eq!(format_number_cell(&EnumCellValue::Number(2.0), Some(2)), "2.00");
        assert_eq!(format_number_cell(&EnumCellValue::Number(0.1234), Some(3)), "0.123");
        assert_eq!(format_number_cell(&EnumCellValue::Number(12.0), None), "12");
        assert_eq!(format_number_cell(&EnumCellValue::None, Some(2)), "");
        assert_eq!(
            format_number_cell(&EnumCellValue::String("n/a".to_string()), Some(2)),
            "n/a"
        );
        assert_eq!(
            format_number_cell(&EnumCellValue::String("12.5".to_string()), Some(2)),
            "12.50"
        );
        assert_eq!(
            format_number_cell(&EnumCellValue::String("12.5".to_string()), None),
            "12.5"
        );
    }

    #[test]
    fn test_plan_numeric_text_gets_fixed_decimals() {
        let df = DataFrame::new(vec![
            Column::new("Art-Nr".into(), &["A1", "A2"]),
            Column::new("Wert".into(), &["12.5", "-"]),
        ])
        .expect("dataset");
        let plan = plan_pdf_pages(&df, &build_small_layout()).expect("plan");
        assert_eq!(
            plan.pages[0].texts(EnumPdfFont::Regular),
            vec!["A1", "12.50", "A2", "-"]
        );
    }
}
