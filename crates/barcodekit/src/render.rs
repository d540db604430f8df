//! Mode dispatch: sanitize the dataset, pick the renderer and preset.

use barcodekit_frame::{Result, TUP_COLUMNS_EXCLUDED, read_dataset_from_xlsx_bytes, sanitize_columns};
use barcodekit_io_pdf::{
    SpecPageLayout, derive_pdf_layout_compact, derive_pdf_layout_landscape,
    derive_pdf_layout_portrait, render_pdf,
};
use barcodekit_io_xlsx::{EnumSheetBarcodeMode, SpecSheetRenderOptions, render_sheet};
use polars::prelude::DataFrame;

use crate::spec::{EnumOutputMode, SpecOutputArtifact};

/// Page layout preset of a PDF mode; `None` for spreadsheet modes.
pub fn derive_page_layout(mode: EnumOutputMode) -> Option<SpecPageLayout> {
    match mode {
        EnumOutputMode::PdfTabularPortrait => Some(derive_pdf_layout_portrait()),
        EnumOutputMode::PdfTabularLandscape => Some(derive_pdf_layout_landscape()),
        EnumOutputMode::PdfCompact => Some(derive_pdf_layout_compact()),
        EnumOutputMode::ExcelImage | EnumOutputMode::ExcelText => None,
    }
}

/// Render `df` in `mode` after dropping the excluded administrative columns.
///
/// The input frame is never modified.
pub fn render_artifact(df: &DataFrame, mode: EnumOutputMode) -> Result<SpecOutputArtifact> {
    tracing::info!(%mode, n_rows = df.height(), n_cols = df.width(), "render requested");
    let df_clean = sanitize_columns(df, &TUP_COLUMNS_EXCLUDED)?;

    let (bytes, n_rows, warnings) = match derive_page_layout(mode) {
        Some(layout) => {
            let artifact = render_pdf(&df_clean, &layout)?;
            (artifact.bytes, artifact.n_rows_data, artifact.warnings)
        }
        None => {
            let mode_sheet = if mode == EnumOutputMode::ExcelImage {
                EnumSheetBarcodeMode::Image
            } else {
                EnumSheetBarcodeMode::Text
            };
            let artifact = render_sheet(&df_clean, mode_sheet, &SpecSheetRenderOptions::default())?;
            (artifact.bytes, artifact.report.n_rows_data, artifact.report.warnings)
        }
    };

    tracing::info!(%mode, n_rows, n_bytes = bytes.len(), "render finished");
    Ok(SpecOutputArtifact {
        mode,
        bytes,
        mime_type: mode.mime_type(),
        file_name: mode.file_name(),
        n_rows,
        warnings,
    })
}

/// Decode an uploaded spreadsheet and render it in `mode`.
pub fn render_artifact_from_xlsx_bytes(
    v_bytes: &[u8],
    mode: EnumOutputMode,
) -> Result<SpecOutputArtifact> {
    let df = read_dataset_from_xlsx_bytes(v_bytes)?;
    render_artifact(&df, mode)
}

/// Parse `mode_key` and render `df`.
pub fn render_artifact_by_key(df: &DataFrame, mode_key: &str) -> Result<SpecOutputArtifact> {
    render_artifact(df, mode_key.parse()?)
}
