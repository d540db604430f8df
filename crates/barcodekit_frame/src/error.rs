//! Render error type shared by all output modes.

use barcodekit_symbol::ErrorSymbol;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Fatal render failure. Every variant aborts the whole render.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A required column (the identifier column) is absent.
    #[error("Required column {column:?} not found in dataset.")]
    MissingColumn { column: String },

    /// The identifier of one row cannot be turned into a barcode.
    #[error("Barcode encoding failed for data row {row_idx}: {source}")]
    Encoding {
        row_idx: usize,
        #[source]
        source: ErrorSymbol,
    },

    /// PDF page layout cannot hold a table.
    #[error("Invalid page layout: {message}")]
    PageConfig { message: String },

    /// Input table violates a structural precondition.
    #[error("Invalid dataset: {message}")]
    InvalidDataset { message: String },

    /// Output-mode key not recognized.
    #[error("Unknown output mode {key:?}; expected one of {expected}.")]
    UnknownMode { key: String, expected: String },

    /// Spreadsheet input could not be decoded.
    #[error("Failed to read spreadsheet: {0}")]
    Read(String),

    #[error("Dataframe operation failed: {0}")]
    Polars(#[from] PolarsError),

    #[error("xlsx write error: {0}")]
    Xlsx(String),

    #[error("pdf write error: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
