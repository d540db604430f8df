//! Decode an uploaded spreadsheet into a dataset.

use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use polars::prelude::{Column, DataFrame, IntoSeries, NamedFrom, PlSmallStr, Series, StructChunked};

use crate::conf::{C_FIELD_MIXED_NUMBER, C_FIELD_MIXED_TEXT, C_PREFIX_UNNAMED_COLUMN};
use crate::error::{RenderError, Result};
use crate::spec::EnumCellValue;
use crate::util::{format_cell_text, validate_unique_columns};

/// Read the first worksheet of an `.xlsx`/`.xls`/`.ods` payload.
///
/// Row 1 holds the column names; the remaining rows are data.
pub fn read_dataset_from_xlsx_bytes(v_bytes: &[u8]) -> Result<DataFrame> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(v_bytes))
        .map_err(|err| RenderError::Read(format!("Failed to open workbook: {err}")))?;

    let Some(c_sheet_name) = workbook.sheet_names().first().cloned() else {
        return Err(RenderError::Read("Workbook has no worksheet.".to_string()));
    };
    let range = workbook
        .worksheet_range(&c_sheet_name)
        .map_err(|err| RenderError::Read(format!("Failed to read sheet {c_sheet_name:?}: {err}")))?;

    let df = derive_dataframe_from_range(&range)?;
    tracing::info!(
        sheet = %c_sheet_name,
        n_rows = df.height(),
        n_cols = df.width(),
        "spreadsheet decoded"
    );
    Ok(df)
}

/// Build a dataframe from a cell range whose first row is the header.
///
/// Columns whose non-blank cells are all numeric become `Int64` (all
/// integral) or `Float64`; columns mixing numbers and text become a struct
/// column so each cell keeps its own type; the rest become text.
pub fn derive_dataframe_from_range(range: &Range<Data>) -> Result<DataFrame> {
    let mut it_rows = range.rows();
    let Some(row_header) = it_rows.next() else {
        return Err(RenderError::InvalidDataset {
            message: "Worksheet is empty; expected a header row.".to_string(),
        });
    };

    let l_colnames: Vec<String> = row_header
        .iter()
        .enumerate()
        .map(|(n_idx, cell)| match derive_cell_value_from_data(cell) {
            EnumCellValue::None => format!("{C_PREFIX_UNNAMED_COLUMN}{n_idx}"),
            value => format_cell_text(&value),
        })
        .collect();
    validate_unique_columns(&l_colnames)
        .map_err(|message| RenderError::InvalidDataset { message })?;

    let mut l_values_by_col: Vec<Vec<EnumCellValue>> = vec![Vec::new(); l_colnames.len()];
    for row in it_rows {
        for (n_idx_col, l_values) in l_values_by_col.iter_mut().enumerate() {
            let value = row
                .get(n_idx_col)
                .map_or(EnumCellValue::None, derive_cell_value_from_data);
            l_values.push(value);
        }
    }

    let l_cols = l_colnames
        .iter()
        .zip(&l_values_by_col)
        .map(|(c_name, l_values)| derive_column(c_name, l_values))
        .collect::<Result<Vec<_>>>()?;

    Ok(DataFrame::new(l_cols)?)
}

fn derive_column(name: &str, values: &[EnumCellValue]) -> Result<Column> {
    let name = PlSmallStr::from(name);
    let if_has_numbers = values
        .iter()
        .any(|value| matches!(value, EnumCellValue::Number(_)));
    let if_has_texts = values
        .iter()
        .any(|value| matches!(value, EnumCellValue::String(_)));

    if if_has_numbers && if_has_texts {
        return derive_mixed_column(name, values);
    }

    if if_has_numbers {
        let l_numbers: Vec<Option<f64>> = values.iter().map(EnumCellValue::as_f64).collect();
        let if_is_integral = l_numbers
            .iter()
            .flatten()
            .all(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64);
        if if_is_integral {
            let l_integers: Vec<Option<i64>> =
                l_numbers.iter().map(|n| n.map(|v| v as i64)).collect();
            return Ok(Column::new(name, l_integers));
        }
        return Ok(Column::new(name, l_numbers));
    }

    let l_texts: Vec<Option<String>> = values
        .iter()
        .map(|value| match value {
            EnumCellValue::None => None,
            _ => Some(format_cell_text(value)),
        })
        .collect();
    Ok(Column::new(name, l_texts))
}

/// Numbers and text in one column: a struct of a number field and a text
/// field, at most one of them set per row.
fn derive_mixed_column(name: PlSmallStr, values: &[EnumCellValue]) -> Result<Column> {
    let l_numbers: Vec<Option<f64>> = values
        .iter()
        .map(|value| match value {
            EnumCellValue::Number(n) => Some(*n),
            _ => None,
        })
        .collect();
    let l_texts: Vec<Option<String>> = values
        .iter()
        .map(|value| match value {
            EnumCellValue::String(s) => Some(s.clone()),
            _ => None,
        })
        .collect();

    let l_fields = [
        Series::new(C_FIELD_MIXED_NUMBER.into(), l_numbers),
        Series::new(C_FIELD_MIXED_TEXT.into(), l_texts),
    ];
    let ca = StructChunked::from_series(name, values.len(), l_fields.iter())?;
    Ok(Column::from(ca.into_series()))
}

fn derive_cell_value_from_data(cell: &Data) -> EnumCellValue {
    match cell {
        Data::Empty => EnumCellValue::None,
        Data::String(s) if s.trim().is_empty() => EnumCellValue::None,
        Data::String(s) => EnumCellValue::String(s.clone()),
        Data::Int(i) => EnumCellValue::Number(*i as f64),
        Data::Float(f) => EnumCellValue::Number(*f),
        Data::Bool(b) => EnumCellValue::String(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(_) => EnumCellValue::String(cell.to_string()),
        Data::DateTimeIso(s) => EnumCellValue::String(s.clone()),
        Data::DurationIso(s) => EnumCellValue::String(s.clone()),
        Data::Error(err) => EnumCellValue::String(format!("#ERR:{err:?}")),
    }
}
