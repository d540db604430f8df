//! Stateless helper utilities used by the sheet renderer.

use barcodekit_frame::{EnumCellValue, RenderError, Result, format_cell_text};

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL};
use crate::spec::{EnumAutofitColumnsRule, SpecAutofitCellsPolicy};

////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Reject tables that do not fit a single worksheet (header row included).
pub fn validate_sheet_bounds(height_data: usize, width_total: usize) -> Result<()> {
    if height_data + 1 > N_NROWS_EXCEL_MAX {
        return Err(RenderError::InvalidDataset {
            message: format!(
                "{height_data} data rows plus header exceed Excel limit of {N_NROWS_EXCEL_MAX} rows."
            ),
        });
    }
    if width_total > N_NCOLS_EXCEL_MAX {
        return Err(RenderError::InvalidDataset {
            message: format!(
                "{width_total} columns exceed Excel limit of {N_NCOLS_EXCEL_MAX} columns."
            ),
        });
    }
    Ok(())
}

pub(crate) fn cast_row_num(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| RenderError::Xlsx(format!("row index overflow: {value}")))
}

pub(crate) fn cast_col_num(value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| RenderError::Xlsx(format!("column index overflow: {value}")))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Autofit

/// Estimate displayed width units for one cell value.
pub fn estimate_width_len(value: &EnumCellValue) -> usize {
    estimate_unicode_string_width(&format_cell_text(value))
}

fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

/// Final column width from recorded header/body widths and policy bounds.
///
/// `None` when the policy disables autofit.
pub fn calculate_column_width(
    width_header: usize,
    width_body: usize,
    policy: &SpecAutofitCellsPolicy,
) -> Option<usize> {
    let n_width_recorded = match policy.rule_columns {
        EnumAutofitColumnsRule::None => return None,
        EnumAutofitColumnsRule::Header => width_header,
        EnumAutofitColumnsRule::All => usize::max(width_header, width_body),
    };
    let n_min = usize::max(1, policy.width_cell_min);
    let n_max = usize::min(255, usize::max(n_min, policy.width_cell_max));
    Some(usize::min(
        n_max,
        usize::max(n_min, n_width_recorded + policy.width_cell_padding),
    ))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
