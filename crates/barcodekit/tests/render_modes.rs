use std::io::Cursor;

use barcodekit::{
    C_MIME_PDF, C_MIME_XLSX, EnumOutputMode, RenderError, derive_page_layout, render_artifact,
    render_artifact_by_key, render_artifact_from_xlsx_bytes, try_init_logger,
};
use barcodekit_frame::read_dataset_from_xlsx_bytes;
use barcodekit_io_pdf::{
    EnumPdfFont, SpecPageLayout, SpecPdfColumn, calculate_rows_per_page, plan_pdf_pages,
};
use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use polars::prelude::{Column, DataFrame};
use rust_xlsxwriter::Workbook;

fn build_dataset(n_rows: usize) -> DataFrame {
    let l_markets: Vec<String> = (0..n_rows).map(|_| "0815".to_string()).collect();
    let l_groups: Vec<i64> = (0..n_rows).map(|n| 10 + n as i64).collect();
    let l_ids: Vec<i64> = (0..n_rows).map(|n| 123456 + n as i64).collect();
    let l_colors: Vec<String> = (0..n_rows).map(|n| format!("Farbe {n}")).collect();
    let l_types: Vec<String> = (0..n_rows).map(|_| "HAWA".to_string()).collect();
    let l_values: Vec<f64> = (0..n_rows).map(|n| n as f64 * 2.5).collect();
    DataFrame::new(vec![
        Column::new("Markt".into(), l_markets),
        Column::new("WGR".into(), l_groups),
        Column::new("Art-Nr".into(), l_ids),
        Column::new("Farbe".into(), l_colors),
        Column::new("MTART".into(), l_types),
        Column::new("Wert".into(), l_values),
    ])
    .expect("dataset")
}

fn read_header(bytes: &[u8]) -> Vec<String> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).expect("open");
    let range = workbook.worksheet_range_at(0).expect("sheet").expect("range");
    range
        .rows()
        .next()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}

fn read_column_values(bytes: &[u8], name: &str) -> Vec<Data> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).expect("open");
    let range = workbook.worksheet_range_at(0).expect("sheet").expect("range");
    let mut it_rows = range.rows();
    let n_idx_col = it_rows
        .next()
        .and_then(|row| row.iter().position(|cell| cell.to_string() == name))
        .expect("column");
    it_rows.map(|row| row[n_idx_col].clone()).collect()
}

fn count_pdf_pages(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes).expect("parse pdf").get_pages().len()
}

#[test]
fn test_excel_text_mode_sanitizes_and_encodes() {
    let _ = try_init_logger(true);
    let artifact = render_artifact(&build_dataset(3), EnumOutputMode::ExcelText).expect("render");

    assert_eq!(artifact.mime_type, C_MIME_XLSX);
    assert_eq!(artifact.file_name, "Artikelliste_mit_Barcodetext.xlsx");
    assert_eq!(artifact.n_rows, 3);
    assert_eq!(
        read_header(&artifact.bytes),
        vec!["Markt", "Art-Nr", "Farbe", "Wert", "Barcode"]
    );

    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(&artifact.bytes[..])).expect("open");
    let range = workbook.worksheet_range("Barcodes als Text").expect("sheet");
    assert_eq!(
        range.get_value((1, 4)),
        Some(&Data::String("\u{00cc}123456\u{00ce}".to_string()))
    );
    assert_eq!(
        read_column_values(&artifact.bytes, "Farbe"),
        vec![
            Data::String("Farbe 0".to_string()),
            Data::String("Farbe 1".to_string()),
            Data::String("Farbe 2".to_string()),
        ]
    );
}

#[test]
fn test_excel_image_mode_keeps_non_excluded_columns() {
    let artifact = render_artifact(&build_dataset(2), EnumOutputMode::ExcelImage).expect("render");

    assert_eq!(artifact.file_name, "Artikelliste_mit_Barcodebildern.xlsx");
    let l_header = read_header(&artifact.bytes);
    assert!(!l_header.iter().any(|c_name| c_name == "WGR" || c_name == "MTART"));
    assert!(l_header.iter().any(|c_name| c_name == "Farbe"));
    assert_eq!(l_header.last().map(String::as_str), Some("Barcode"));
    assert_eq!(
        read_column_values(&artifact.bytes, "Farbe"),
        vec![
            Data::String("Farbe 0".to_string()),
            Data::String("Farbe 1".to_string()),
        ]
    );
}

#[test]
fn test_pdf_modes_page_counts() {
    let df = build_dataset(30);
    for (mode, n_pages) in [
        (EnumOutputMode::PdfTabularPortrait, 3),
        (EnumOutputMode::PdfTabularLandscape, 4),
        (EnumOutputMode::PdfCompact, 2),
    ] {
        let artifact = render_artifact(&df, mode).expect("render");
        assert_eq!(artifact.mime_type, C_MIME_PDF);
        assert_eq!(artifact.n_rows, 30);
        assert_eq!(count_pdf_pages(&artifact.bytes), n_pages, "{mode}");
    }
}

#[test]
fn test_pdf_third_page_holds_remainder() {
    let layout = derive_page_layout(EnumOutputMode::PdfTabularPortrait).expect("layout");
    let n_capacity = calculate_rows_per_page(&layout).expect("rows");
    let df = build_dataset(2 * (n_capacity - 1) + 3);

    let plan = plan_pdf_pages(&df, &layout).expect("plan");
    assert_eq!(plan.pages.len(), 3);
    assert_eq!(plan.pages[2].n_rows_data, 3);
    for page in &plan.pages {
        let l_header = page.texts(EnumPdfFont::Bold);
        assert_eq!(l_header.first(), Some(&"Markt"));
        assert!(!l_header.contains(&"WGR"));
    }
}

#[test]
fn test_empty_dataset_renders_header_only() {
    let df = build_dataset(0);

    let artifact = render_artifact(&df, EnumOutputMode::PdfCompact).expect("render");
    assert_eq!(artifact.n_rows, 0);
    assert_eq!(count_pdf_pages(&artifact.bytes), 1);

    let artifact = render_artifact(&df, EnumOutputMode::ExcelImage).expect("render");
    assert_eq!(artifact.n_rows, 0);
    assert_eq!(
        read_header(&artifact.bytes),
        vec!["Markt", "Art-Nr", "Farbe", "Wert", "Barcode"]
    );
}

#[test]
fn test_render_from_uploaded_workbook() {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (n_col, c_name) in ["Markt", "Abt.", "Art-Nr", "Art-Bez"].into_iter().enumerate() {
        worksheet.write_string(0, n_col as u16, c_name).expect("header");
    }
    worksheet.write_string(1, 0, "0815").expect("cell");
    worksheet.write_string(1, 1, "12").expect("cell");
    worksheet.write_number(1, 2, 4711.0).expect("cell");
    worksheet.write_string(1, 3, "Hammer").expect("cell");
    let v_input = workbook.save_to_buffer().expect("save");

    let artifact =
        render_artifact_from_xlsx_bytes(&v_input, EnumOutputMode::ExcelText).expect("render");
    assert_eq!(
        read_header(&artifact.bytes),
        vec!["Markt", "Art-Nr", "Art-Bez", "Barcode"]
    );

    let mut workbook_out: Xlsx<_> =
        open_workbook_from_rs(Cursor::new(&artifact.bytes[..])).expect("open");
    let range = workbook_out.worksheet_range("Barcodes als Text").expect("sheet");
    assert_eq!(
        range.get_value((1, 3)),
        Some(&Data::String("\u{00cc}4711\u{00ce}".to_string()))
    );
}

#[test]
fn test_uploaded_mixed_column_keeps_numbers() {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Art-Nr").expect("header");
    worksheet.write_string(0, 1, "Wert").expect("header");
    worksheet.write_string(1, 0, "A1").expect("cell");
    worksheet.write_number(1, 1, 12.5).expect("cell");
    worksheet.write_string(2, 0, "A2").expect("cell");
    worksheet.write_string(2, 1, "-").expect("cell");
    let v_input = workbook.save_to_buffer().expect("save");

    let artifact =
        render_artifact_from_xlsx_bytes(&v_input, EnumOutputMode::ExcelText).expect("render");
    assert_eq!(
        read_column_values(&artifact.bytes, "Wert"),
        vec![Data::Float(12.5), Data::String("-".to_string())]
    );

    let df = read_dataset_from_xlsx_bytes(&v_input).expect("read");
    let layout = SpecPageLayout {
        columns: vec![
            SpecPdfColumn::text("Art-Nr", 0.0, None),
            SpecPdfColumn::number("Wert", 60.0, Some(2)),
        ],
        ..derive_page_layout(EnumOutputMode::PdfTabularPortrait).expect("layout")
    };
    let plan = plan_pdf_pages(&df, &layout).expect("plan");
    assert_eq!(
        plan.pages[0].texts(EnumPdfFont::Regular),
        vec!["A1", "12.50", "A2", "-"]
    );
}

#[test]
fn test_render_errors_propagate() {
    let err = render_artifact_by_key(&build_dataset(1), "word").expect_err("must fail");
    assert!(matches!(err, RenderError::UnknownMode { .. }));

    let df = build_dataset(1).drop("Art-Nr").expect("drop");
    for mode in EnumOutputMode::ALL {
        let err = render_artifact(&df, mode).expect_err("must fail");
        assert!(matches!(err, RenderError::MissingColumn { .. }), "{mode}");
    }

    let err = render_artifact_from_xlsx_bytes(b"not a workbook", EnumOutputMode::PdfCompact)
        .expect_err("must fail");
    assert!(matches!(err, RenderError::Read(_)));
}
