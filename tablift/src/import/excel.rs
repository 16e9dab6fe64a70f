//! Read an Excel workbook sheet into a table

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx, open_workbook};

use crate::error::Error;
use crate::table::{Row, Table, Value};

/// Read one worksheet into a [`Table`]
///
/// The first row names the columns. `sheet` picks a worksheet by name;
/// absent, the first sheet is read. Fully empty rows are dropped.
pub fn read_excel_table(path: &Path, sheet: Option<&str>) -> Result<Table> {
    if !path.exists() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    if !path.is_file() {
        return Err(Error::NotAFile {
            path: path.to_path_buf(),
        }
        .into());
    }

    let mut workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .context("Excel file has no sheets")?
            .clone(),
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let mut rows_iter = range.rows();
    let columns: Vec<String> = match rows_iter.next() {
        Some(header) => header
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect(),
        None => return Ok(Table::default()),
    };

    let mut rows = Vec::new();
    for cells in rows_iter {
        if cells.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }

        let mut row = Row::new();
        for (idx, column) in columns.iter().enumerate() {
            let value = cells.get(idx).map(cell_to_value).unwrap_or(Value::Null);
            if !value.is_null() {
                row.insert(column.clone(), value);
            }
        }
        rows.push(row);
    }

    log::debug!(
        "read {} rows from {} sheet {}",
        rows.len(),
        path.display(),
        sheet_name
    );
    Ok(Table::from_rows(columns, rows))
}

/// Convert an Excel cell to a scalar value
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) if s.is_empty() => Value::Null,
        Data::String(s) => {
            match s.to_lowercase().as_str() {
                "true" => return Value::Bool(true),
                "false" => return Value::Bool(false),
                _ => {}
            }
            Value::String(s.clone())
        }
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => {
            // Whole numbers come back as integers
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                Value::Int(*f as i64)
            } else {
                Value::Float(*f)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => Value::String(format!("{}", dt)),
        Data::DateTimeIso(s) => Value::String(s.clone()),
        Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) => Value::Null,
    }
}
