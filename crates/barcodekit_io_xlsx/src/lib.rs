//! `barcodekit_io_xlsx` v1:
//! Spreadsheet renderer with image or font-text barcodes.
//!
//! - `conf`   : Excel limits, sheet titles, default presets
//! - `spec`   : formats, render options, report
//! - `util`   : pure helper functions
//! - `writer` : workbook renderer
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_SHEET_NAME_IMAGE, C_SHEET_NAME_TEXT, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    derive_default_sheet_formats,
};
pub use spec::{
    EnumAutofitColumnsRule, EnumSheetBarcodeMode, SpecAutofitCellsPolicy,
    SpecBarcodeImagePlacement, SpecCellFormat, SpecSheetArtifact, SpecSheetFormats,
    SpecSheetRenderOptions, SpecSheetReport,
};
pub use util::{calculate_column_width, sanitize_sheet_name};
pub use writer::render_sheet;
