//! Stateless dataset helpers: column sanitizing, cell access, identifiers.

use std::collections::{BTreeMap, BTreeSet};

use barcodekit_symbol::ErrorSymbol;
use polars::prelude::{AnyValue, Column, DataFrame, DataType};

use crate::conf::{COL_IDENTIFIER, N_ABS_INTEGRAL_TEXT_MAX};
use crate::error::{RenderError, Result};
use crate::spec::EnumCellValue;

////////////////////////////////////////////////////////////////////////////////
// #region ColumnSanitizing

/// Drop every column whose name exactly matches an entry in `excluded`.
///
/// Absent names are ignored; retained columns and all rows keep their order.
pub fn sanitize_columns<S: AsRef<str>>(df: &DataFrame, excluded: &[S]) -> Result<DataFrame> {
    let set_excluded: BTreeSet<&str> = excluded.iter().map(AsRef::as_ref).collect();
    let l_colnames_kept: Vec<String> = df
        .get_column_names_str()
        .into_iter()
        .filter(|c_name| !set_excluded.contains(c_name))
        .map(ToString::to_string)
        .collect();

    if l_colnames_kept.len() == df.width() {
        return Ok(df.clone());
    }

    tracing::debug!(
        n_cols_dropped = df.width() - l_colnames_kept.len(),
        "sanitized dataset columns"
    );
    Ok(df.select(l_colnames_kept)?)
}

/// Return column names as owned strings, in frame order.
pub fn derive_column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names_str()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

/// Validate that `columns` has no duplicated names.
pub fn validate_unique_columns(columns: &[String]) -> std::result::Result<(), String> {
    if columns.len() == columns.iter().collect::<BTreeSet<_>>().len() {
        return Ok(());
    }

    let mut dict_pos: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (n_idx, c_name) in columns.iter().enumerate() {
        dict_pos.entry(c_name).or_default().push(n_idx);
    }

    let c_msg = dict_pos
        .iter()
        .filter(|(_, l_pos)| l_pos.len() > 1)
        .map(|(c_name, l_pos)| format!("{c_name:?} x{} at indices {:?}", l_pos.len(), l_pos))
        .collect::<Vec<_>>()
        .join("; ");

    Err(format!("Duplicate column names detected: {c_msg}"))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellValues

/// Read one normalized cell value.
///
/// Struct columns (mixed numeric/text input) yield their first non-null field.
pub fn derive_cell_value(col: &Column, row_idx: usize) -> Result<EnumCellValue> {
    if matches!(col.dtype(), DataType::Struct(_)) {
        let ca = col.as_materialized_series().struct_()?;
        for s_field in ca.fields_as_series() {
            let value = derive_cell_value_from_any_value(s_field.get(row_idx)?);
            if !value.is_none() {
                return Ok(value);
            }
        }
        return Ok(EnumCellValue::None);
    }
    Ok(derive_cell_value_from_any_value(col.get(row_idx)?))
}

/// Normalize a polars scalar into [`EnumCellValue`].
pub fn derive_cell_value_from_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::None,
        AnyValue::String(val) => EnumCellValue::String(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::String(val.to_string()),
        AnyValue::Boolean(val) => {
            EnumCellValue::String(if val { "True" } else { "False" }.to_string())
        }
        AnyValue::UInt8(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt16(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt32(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int8(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int16(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float64(val) => EnumCellValue::Number(val),
        _ => EnumCellValue::String(value.to_string()),
    }
}

/// Text form of a number: integral values print without a decimal point.
pub fn format_number_text(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < N_ABS_INTEGRAL_TEXT_MAX {
        return format!("{}", n as i64);
    }
    n.to_string()
}

/// Text form of a cell as drawn in a plain text field.
pub fn format_cell_text(value: &EnumCellValue) -> String {
    match value {
        EnumCellValue::None => String::new(),
        EnumCellValue::String(s) => s.clone(),
        EnumCellValue::Number(n) => format_number_text(*n),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Identifiers

/// Extract the barcode payload of every row from [`COL_IDENTIFIER`].
///
/// Missing column is a [`RenderError::MissingColumn`]; a blank identifier
/// cell is an encoding error for that row.
pub fn select_identifiers(df: &DataFrame) -> Result<Vec<String>> {
    let col = df
        .column(COL_IDENTIFIER)
        .map_err(|_| RenderError::MissingColumn {
            column: COL_IDENTIFIER.to_string(),
        })?;

    let mut l_identifiers = Vec::with_capacity(df.height());
    for n_idx_row in 0..df.height() {
        let c_identifier = format_cell_text(&derive_cell_value(col, n_idx_row)?);
        if c_identifier.is_empty() {
            return Err(RenderError::Encoding {
                row_idx: n_idx_row,
                source: ErrorSymbol::EmptyIdentifier,
            });
        }
        l_identifiers.push(c_identifier);
    }
    Ok(l_identifiers)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::TUP_COLUMNS_EXCLUDED;

    fn build_dataset() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Markt".into(), &["0815", "0816", "0817"]),
            Column::new("WGR".into(), &[1i64, 2, 3]),
            Column::new("Art-Nr".into(), &[123456i64, 654321, 42]),
            Column::new("Farbe".into(), &["rot", "blau", "grün"]),
            Column::new("MTART".into(), &["HAWA", "HAWA", "FERT"]),
        ])
        .expect("dataset")
    }

    #[test]
    fn test_sanitize_columns_drops_only_excluded() {
        let df = build_dataset();
        let df_out = sanitize_columns(&df, &TUP_COLUMNS_EXCLUDED).expect("sanitize");

        assert_eq!(df_out.height(), 3);
        assert_eq!(derive_column_names(&df_out), vec!["Markt", "Art-Nr", "Farbe"]);
    }

    #[test]
    fn test_sanitize_columns_ignores_absent_names() {
        let df = build_dataset();
        let df_out = sanitize_columns(&df, &["Wertart.", "Abt."]).expect("sanitize");
        assert_eq!(derive_column_names(&df_out), derive_column_names(&df));

        let l_excluded: Vec<String> = vec![];
        let df_out = sanitize_columns(&df, &l_excluded).expect("sanitize");
        assert_eq!(df_out.width(), 5);
    }

    #[test]
    fn test_select_identifiers_formats_integral_numbers() {
        let df = DataFrame::new(vec![Column::new(
            "Art-Nr".into(),
            &[123456.0f64, 7.5],
        )])
        .expect("dataset");
        assert_eq!(select_identifiers(&df).expect("ids"), vec!["123456", "7.5"]);
    }

    #[test]
    fn test_select_identifiers_missing_column() {
        let df = DataFrame::new(vec![Column::new("Markt".into(), &["0815"])]).expect("dataset");
        let err = select_identifiers(&df).expect_err("must fail");
        assert!(matches!(err, RenderError::MissingColumn { column } if column == "Art-Nr"));
    }

    #[test]
    fn test_select_identifiers_blank_cell() {
        let df = DataFrame::new(vec![Column::new(
            "Art-Nr".into(),
            &[Some("A1"), None],
        )])
        .expect("dataset");
        let err = select_identifiers(&df).expect_err("must fail");
        assert!(matches!(
            err,
            RenderError::Encoding {
                row_idx: 1,
                source: ErrorSymbol::EmptyIdentifier
            }
        ));
    }

    #[test]
    fn test_validate_unique_columns_reports_positions() {
        let columns = vec!["A".to_string(), "B".to_string(), "A".to_string()];
        let err = validate_unique_columns(&columns).expect_err("must fail");
        assert!(err.contains("\"A\" x2 at indices [0, 2]"));
    }
}
