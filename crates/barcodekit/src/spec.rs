//! Output modes and the finished artifact.

use std::fmt;
use std::str::FromStr;

use barcodekit_frame::RenderError;

/// MIME type of `.xlsx` artifacts.
pub const C_MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
/// MIME type of `.pdf` artifacts.
pub const C_MIME_PDF: &str = "application/pdf";

////////////////////////////////////////////////////////////////////////////////
// #region OutputMode

/// The five output modes, keyed by their external names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumOutputMode {
    /// `excel-image`
    ExcelImage,
    /// `excel-text`
    ExcelText,
    /// `pdf-tabular-portrait`
    PdfTabularPortrait,
    /// `pdf-tabular-landscape`
    PdfTabularLandscape,
    /// `pdf-compact`
    PdfCompact,
}

impl EnumOutputMode {
    pub const ALL: [Self; 5] = [
        Self::ExcelImage,
        Self::ExcelText,
        Self::PdfTabularPortrait,
        Self::PdfTabularLandscape,
        Self::PdfCompact,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::ExcelImage => "excel-image",
            Self::ExcelText => "excel-text",
            Self::PdfTabularPortrait => "pdf-tabular-portrait",
            Self::PdfTabularLandscape => "pdf-tabular-landscape",
            Self::PdfCompact => "pdf-compact",
        }
    }

    pub fn is_pdf(self) -> bool {
        !matches!(self, Self::ExcelImage | Self::ExcelText)
    }

    pub fn mime_type(self) -> &'static str {
        if self.is_pdf() { C_MIME_PDF } else { C_MIME_XLSX }
    }

    /// Download file name.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::ExcelImage => "Artikelliste_mit_Barcodebildern.xlsx",
            Self::ExcelText => "Artikelliste_mit_Barcodetext.xlsx",
            Self::PdfTabularPortrait => "Artikelliste_mit_Barcodes.pdf",
            Self::PdfTabularLandscape => "Artikelliste_mit_Barcodes_quer.pdf",
            Self::PdfCompact => "Artikelliste_mit_Barcodes_kompakt.pdf",
        }
    }
}

impl FromStr for EnumOutputMode {
    type Err = RenderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.key() == value)
            .ok_or_else(|| RenderError::UnknownMode {
                key: value.to_string(),
                expected: format!(
                    "[{}]",
                    Self::ALL
                        .iter()
                        .map(|mode| format!("'{}'", mode.key()))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }
}

impl fmt::Display for EnumOutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Artifact

/// Fully built render result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecOutputArtifact {
    pub mode: EnumOutputMode,
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub file_name: &'static str,
    /// Data rows written.
    pub n_rows: usize,
    /// Non-fatal warnings collected by the renderer.
    pub warnings: Vec<String>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mode_keys_round_trip() {
        for mode in EnumOutputMode::ALL {
            assert_eq!(mode.to_string().parse::<EnumOutputMode>().expect("parse"), mode);
        }
    }

    #[test]
    fn test_output_mode_unknown_key() {
        let err = "pdf".parse::<EnumOutputMode>().expect_err("must fail");
        assert!(matches!(
            &err,
            RenderError::UnknownMode { key, expected }
                if key == "pdf" && expected.contains("'pdf-compact'")
        ));
    }

    #[test]
    fn test_output_mode_mime_and_file_name() {
        assert_eq!(EnumOutputMode::ExcelText.mime_type(), C_MIME_XLSX);
        assert_eq!(EnumOutputMode::PdfCompact.mime_type(), C_MIME_PDF);
        assert_eq!(
            EnumOutputMode::PdfTabularLandscape.file_name(),
            "Artikelliste_mit_Barcodes_quer.pdf"
        );
    }
}
