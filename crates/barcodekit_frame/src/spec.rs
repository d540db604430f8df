//! Shared dataset value models.

/// Normalized cell value read from a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

impl EnumCellValue {
    /// Whether the cell carries no value.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Numeric view; numeric-looking strings are parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(s) => s.trim().parse::<f64>().ok(),
            Self::None => None,
        }
    }
}
