//! Barcode symbol models, raster options and errors.

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Code128 code set selected by the start symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumCode128Set {
    /// Digit pairs (`00`..`99`).
    C,
    /// Printable ASCII.
    B,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Encoded Code128 symbol: symbol values plus the expanded module row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecBarcodeModules {
    /// Code set chosen by the start symbol.
    pub set_start: EnumCode128Set,
    /// Symbol values: start, data, checksum (stop excluded).
    pub values: Vec<u8>,
    /// Module row, `true` for a dark module. Quiet zones are not included.
    pub modules: Vec<bool>,
}

impl SpecBarcodeModules {
    /// Number of modules, quiet zones excluded.
    pub fn width_modules(&self) -> usize {
        self.modules.len()
    }

    /// Checksum symbol value.
    pub fn checksum(&self) -> u8 {
        self.values.last().copied().unwrap_or_default()
    }

    /// Dark runs as `(module_start, module_len)`.
    pub fn bars(&self) -> Vec<(usize, usize)> {
        let mut l_bars = Vec::new();
        let mut n_idx = 0;
        while n_idx < self.modules.len() {
            if !self.modules[n_idx] {
                n_idx += 1;
                continue;
            }
            let n_start = n_idx;
            while n_idx < self.modules.len() && self.modules[n_idx] {
                n_idx += 1;
            }
            l_bars.push((n_start, n_idx - n_start));
        }
        l_bars
    }
}

/// Raster geometry for barcode images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecRasterOptions {
    /// Pixel width of one module.
    pub px_per_module: u32,
    /// Pixel height of the bars.
    pub px_height_bars: u32,
    /// Light modules added on each side.
    pub n_quiet_modules: u32,
}

impl Default for SpecRasterOptions {
    /// 0.25 mm modules, 10 mm bars and a 1 mm quiet zone at 300 dpi.
    fn default() -> Self {
        Self {
            px_per_module: 3,
            px_height_bars: 118,
            n_quiet_modules: 4,
        }
    }
}

/// Barcode production failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorSymbol {
    /// Code128 needs at least one data character.
    #[error("Identifier is empty; nothing to encode.")]
    EmptyIdentifier,
    /// Character has no Code128 representation in the supported code sets.
    #[error("Identifier {identifier:?} has unsupported character {ch:?} at position {position}.")]
    UnsupportedChar {
        /// Full identifier text.
        identifier: String,
        /// Offending character.
        ch: char,
        /// Zero-based character position.
        position: usize,
    },
    /// Raster options are unusable or the image encoder failed.
    #[error("Barcode raster failed: {0}")]
    Raster(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
