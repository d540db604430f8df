//! `barcodekit_symbol` v1:
//! Code128 barcode producer.
//!
//! - `conf`    : symbol tables and sentinel characters
//! - `spec`    : symbol models, raster options, errors
//! - `code128` : symbol encoding and font-sentinel text
//! - `raster`  : in-memory image/PNG rendering
pub mod code128;
pub mod conf;
pub mod raster;
pub mod spec;

pub use code128::{calculate_checksum, encode_modules, encode_text};
pub use conf::{CHR_FONT_SENTINEL_START, CHR_FONT_SENTINEL_STOP};
pub use raster::{encode_image, encode_png};
pub use spec::{EnumCode128Set, ErrorSymbol, SpecBarcodeModules, SpecRasterOptions};
