//! `barcodekit_io_pdf` v1:
//! Paginated PDF article list with vector Code128 bars.
//!
//! - `conf`   : page geometry, font metrics, layout presets
//! - `spec`   : layout configuration, draw plan, artifact
//! - `layout` : pure pagination planner
//! - `writer` : printpdf emitter
pub mod conf;
pub mod layout;
pub mod spec;
pub mod writer;

pub use conf::{
    MM_PER_PT, derive_pdf_layout_compact, derive_pdf_layout_landscape, derive_pdf_layout_portrait,
};
pub use layout::{
    calculate_rows_per_page, estimate_text_width_mm, format_number_cell, plan_pdf_pages,
    validate_column_offsets,
};
pub use spec::{
    EnumPdfColumnKind, EnumPdfDrawOp, EnumPdfFont, SpecPageLayout, SpecPdfArtifact,
    SpecPdfBarcodeStyle, SpecPdfColumn, SpecPdfLayoutPlan, SpecPdfPage,
};
pub use writer::{render_pdf, write_pdf_plan};
