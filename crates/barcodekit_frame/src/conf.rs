//! Dataset constants.

/// Article number column; its text is the barcode payload.
pub const COL_IDENTIFIER: &str = "Art-Nr";
/// Column/header label used for the barcode in every output mode.
pub const COL_BARCODE: &str = "Barcode";

/// Administrative columns dropped before rendering.
pub const TUP_COLUMNS_EXCLUDED: [&str; 5] = ["MTART", "Abt.", "WGR", "WGR-Bezeichnung", "Wertart."];

/// Number field of a column that mixes numeric and text cells.
pub const C_FIELD_MIXED_NUMBER: &str = "number";
/// Text field of a column that mixes numeric and text cells.
pub const C_FIELD_MIXED_TEXT: &str = "text";

/// Prefix for header cells left empty in the input sheet.
pub const C_PREFIX_UNNAMED_COLUMN: &str = "Unnamed: ";

/// Largest magnitude rendered without a decimal point when integral.
pub const N_ABS_INTEGRAL_TEXT_MAX: f64 = 1e15;
