//! Sheet rendering models and options.

use barcodekit_symbol::SpecRasterOptions;

use crate::conf::{
    C_SHEET_NAME_IMAGE, C_SHEET_NAME_TEXT, N_HEIGHT_BARCODE_ROW, N_PX_BARCODE_IMAGE_HEIGHT,
    N_PX_BARCODE_IMAGE_WIDTH, N_WIDTH_BARCODE_COLUMN, derive_default_sheet_formats,
};

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Bottom border override.
    pub bottom: Option<i64>,

    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color.
    pub bg_color: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            bottom: other.bottom.or(self.bottom),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

/// Format presets used by one sheet render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetFormats {
    /// Header row format; must differ visibly from body formats.
    pub header: SpecCellFormat,
    /// Body format for text cells.
    pub text: SpecCellFormat,
    /// Body format for numeric cells.
    pub number: SpecCellFormat,
}

impl Default for SpecSheetFormats {
    fn default() -> Self {
        derive_default_sheet_formats()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RenderOptions

/// Barcode representation inside the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumSheetBarcodeMode {
    /// PNG image anchored in an extra column.
    Image,
    /// Sentinel-wrapped text column for a Code128 font.
    Text,
}

impl EnumSheetBarcodeMode {
    /// Default sheet title for the mode.
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Self::Image => C_SHEET_NAME_IMAGE,
            Self::Text => C_SHEET_NAME_TEXT,
        }
    }
}

/// Autofit rule for column width inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumAutofitColumnsRule {
    /// Disable autofit.
    None,
    /// Infer width from header cells only (default).
    #[default]
    Header,
    /// Infer width from header and body cells.
    All,
}

/// Autofit policy for data columns (the image column has a fixed width).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Autofit width inference rule.
    pub rule_columns: EnumAutofitColumnsRule,
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            rule_columns: EnumAutofitColumnsRule::Header,
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

/// Placement of barcode images in image mode.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecBarcodeImagePlacement {
    /// Displayed image width in pixels.
    pub width_px: u32,
    /// Displayed image height in pixels.
    pub height_px: u32,
    /// Width of the barcode column in characters.
    pub width_column: f64,
    /// Height of data rows in points.
    pub height_row: f64,
}

impl Default for SpecBarcodeImagePlacement {
    fn default() -> Self {
        Self {
            width_px: N_PX_BARCODE_IMAGE_WIDTH,
            height_px: N_PX_BARCODE_IMAGE_HEIGHT,
            width_column: N_WIDTH_BARCODE_COLUMN,
            height_row: N_HEIGHT_BARCODE_ROW,
        }
    }
}

/// Per-call sheet render options.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSheetRenderOptions {
    /// Sheet title; the mode's default title when `None`.
    pub sheet_name: Option<String>,
    /// Cell formats.
    pub formats: SpecSheetFormats,
    /// Column autofit policy.
    pub policy_autofit: SpecAutofitCellsPolicy,
    /// Freeze the header row.
    pub if_freeze_header: bool,
    /// Image placement (image mode only).
    pub placement: SpecBarcodeImagePlacement,
    /// Raster geometry (image mode only).
    pub raster: SpecRasterOptions,
}

impl Default for SpecSheetRenderOptions {
    fn default() -> Self {
        Self {
            sheet_name: None,
            formats: SpecSheetFormats::default(),
            policy_autofit: SpecAutofitCellsPolicy::default(),
            if_freeze_header: true,
            placement: SpecBarcodeImagePlacement::default(),
            raster: SpecRasterOptions::default(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-render report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecSheetReport {
    /// Actual sheet name in the workbook.
    pub sheet_name: String,
    /// Data rows written below the header.
    pub n_rows_data: usize,
    /// Columns written, barcode column included.
    pub n_cols: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecSheetReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

/// Finished workbook bytes plus render report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSheetArtifact {
    /// Serialized `.xlsx` payload.
    pub bytes: Vec<u8>,
    /// Render report.
    pub report: SpecSheetReport,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
