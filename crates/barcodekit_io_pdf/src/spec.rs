//! Page layout configuration, draw plan and artifact models.

////////////////////////////////////////////////////////////////////////////////
// #region LayoutConfiguration

/// What a configured column draws for each data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumPdfColumnKind {
    /// Left-aligned text, optionally cut to a maximum character count.
    Text { n_chars_max: Option<usize> },
    /// Right-aligned number at `offset + numeric_pad`; fixed decimals when set.
    Number { n_decimals: Option<usize> },
    /// Code128 bars for the row identifier.
    Barcode,
}

/// One drawn column: key (header label and dataset column) and x-offset.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecPdfColumn {
    /// Header label and dataset column name.
    pub key: String,
    /// Offset from the left margin in millimetres.
    pub x_offset_mm: f32,
    /// Cell content kind.
    pub kind: EnumPdfColumnKind,
}

impl SpecPdfColumn {
    pub fn text(key: &str, x_offset_mm: f32, n_chars_max: Option<usize>) -> Self {
        Self {
            key: key.to_string(),
            x_offset_mm,
            kind: EnumPdfColumnKind::Text { n_chars_max },
        }
    }

    pub fn number(key: &str, x_offset_mm: f32, n_decimals: Option<usize>) -> Self {
        Self {
            key: key.to_string(),
            x_offset_mm,
            kind: EnumPdfColumnKind::Number { n_decimals },
        }
    }

    pub fn barcode(key: &str, x_offset_mm: f32) -> Self {
        Self {
            key: key.to_string(),
            x_offset_mm,
            kind: EnumPdfColumnKind::Barcode,
        }
    }
}

/// Vector barcode geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecPdfBarcodeStyle {
    /// Narrowest bar width in points.
    pub module_width_pt: f32,
    /// Bar height in millimetres.
    pub bar_height_mm: f32,
    /// Distance the bars' bottom edge sits below the text baseline, in points.
    pub nudge_pt: f32,
    /// Light modules left of the first bar.
    pub n_quiet_modules: u32,
}

impl Default for SpecPdfBarcodeStyle {
    fn default() -> Self {
        Self {
            module_width_pt: 0.55,
            bar_height_mm: 11.0,
            nudge_pt: 2.0,
            n_quiet_modules: 10,
        }
    }
}

/// Complete page layout for one PDF render.
///
/// Passed by value into the engine; rendering never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecPageLayout {
    /// Document title.
    pub title: String,
    /// Page width in millimetres.
    pub page_width_mm: f32,
    /// Page height in millimetres.
    pub page_height_mm: f32,
    /// Left page-edge offset in millimetres.
    pub x_margin_mm: f32,
    /// Top and bottom page-edge offset in millimetres.
    pub y_margin_mm: f32,
    /// Vertical advance per table row (header included) in millimetres.
    pub line_height_mm: f32,
    /// Header font size (Helvetica-Bold) in points.
    pub font_size_header_pt: f32,
    /// Body font size (Helvetica) in points.
    pub font_size_body_pt: f32,
    /// Right edge of numbers relative to their column offset, in points.
    pub numeric_pad_pt: f32,
    /// Columns in draw order.
    pub columns: Vec<SpecPdfColumn>,
    /// Barcode geometry.
    pub barcode: SpecPdfBarcodeStyle,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region DrawPlan

/// Built-in font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumPdfFont {
    Regular,
    Bold,
}

/// One positioned drawing instruction; coordinates in millimetres from the
/// bottom-left page corner.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumPdfDrawOp {
    /// Text whose baseline starts at `(x_mm, y_mm)`.
    Text {
        x_mm: f32,
        y_mm: f32,
        text: String,
        font: EnumPdfFont,
        size_pt: f32,
    },
    /// Filled bars standing on `y_mm`; each bar is `(x_mm, width_mm)`.
    Bars {
        y_mm: f32,
        height_mm: f32,
        bars: Vec<(f32, f32)>,
    },
}

/// Draw plan of one page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecPdfPage {
    /// Instructions in draw order; the header comes first.
    pub ops: Vec<EnumPdfDrawOp>,
    /// Data rows placed on this page.
    pub n_rows_data: usize,
}

impl SpecPdfPage {
    /// Text instructions drawn in `font`.
    pub fn texts(&self, font: EnumPdfFont) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                EnumPdfDrawOp::Text {
                    text, font: f, ..
                } if *f == font => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Complete, validated draw plan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecPdfLayoutPlan {
    /// Row capacity per page, header row included.
    pub rows_per_page: usize,
    /// Pages in output order; never empty.
    pub pages: Vec<SpecPdfPage>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecPdfLayoutPlan {
    /// Data rows over all pages.
    pub fn n_rows_data(&self) -> usize {
        self.pages.iter().map(|page| page.n_rows_data).sum()
    }
}

/// Finished PDF bytes plus plan summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecPdfArtifact {
    /// Serialized PDF payload.
    pub bytes: Vec<u8>,
    /// Pages written.
    pub n_pages: usize,
    /// Data rows written.
    pub n_rows_data: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
