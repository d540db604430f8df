//! `barcodekit_frame` v1:
//! Dataset kernel shared by the sheet and PDF renderers.
//!
//! - `conf`   : fixed column names and exclusion list
//! - `spec`   : cell value model
//! - `error`  : render error type
//! - `util`   : sanitizing, cell access, identifier extraction
//! - `reader` : spreadsheet decoding
pub mod conf;
pub mod error;
pub mod reader;
pub mod spec;
pub mod util;

pub use conf::{COL_BARCODE, COL_IDENTIFIER, TUP_COLUMNS_EXCLUDED};
pub use error::{RenderError, Result};
pub use reader::{derive_dataframe_from_range, read_dataset_from_xlsx_bytes};
pub use spec::EnumCellValue;
pub use util::{
    derive_cell_value, derive_column_names, format_cell_text, format_number_text,
    sanitize_columns, select_identifiers, validate_unique_columns,
};
