//! `barcodekit` v1:
//! Article list renderer: spreadsheet in, barcoded `.xlsx` or `.pdf` out.
//!
//! - `spec`   : output modes and artifact
//! - `render` : sanitize-then-dispatch facade
//! - `logger` : tracing subscriber setup
pub mod logger;
pub mod render;
pub mod spec;

pub use barcodekit_frame::{RenderError, Result};
pub use logger::{init_logger, try_init_logger};
pub use render::{
    derive_page_layout, render_artifact, render_artifact_by_key, render_artifact_from_xlsx_bytes,
};
pub use spec::{C_MIME_PDF, C_MIME_XLSX, EnumOutputMode, SpecOutputArtifact};
