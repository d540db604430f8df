//! XLSX constants and default preset factories.

use crate::spec::{SpecCellFormat, SpecSheetFormats};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Sheet title for image-mode workbooks.
pub const C_SHEET_NAME_IMAGE: &str = "Barcodes als Bild";
/// Sheet title for text-mode workbooks.
pub const C_SHEET_NAME_TEXT: &str = "Barcodes als Text";

/// Rendered barcode image width in pixels.
pub const N_PX_BARCODE_IMAGE_WIDTH: u32 = 120;
/// Rendered barcode image height in pixels.
pub const N_PX_BARCODE_IMAGE_HEIGHT: u32 = 30;
/// Width (characters) of the barcode image column.
pub const N_WIDTH_BARCODE_COLUMN: f64 = 22.0;
/// Data row height (points) in image mode; fits a 30 px image.
pub const N_HEIGHT_BARCODE_ROW: f64 = 24.0;

/// Build default header/text/number formats.
pub fn derive_default_sheet_formats() -> SpecSheetFormats {
    let cfg_base_fmt_spec = SpecCellFormat {
        font_name: Some("Calibri".to_string()),
        font_size: Some(11),
        valign: Some("vcenter".to_string()),
        ..Default::default()
    };

    SpecSheetFormats {
        header: cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            border: Some(1),
            bottom: Some(2),
            ..Default::default()
        }),
        text: cfg_base_fmt_spec.with_(SpecCellFormat {
            align: Some("left".to_string()),
            ..Default::default()
        }),
        number: cfg_base_fmt_spec.with_(SpecCellFormat {
            align: Some("right".to_string()),
            num_format: Some("General".to_string()),
            ..Default::default()
        }),
    }
}
