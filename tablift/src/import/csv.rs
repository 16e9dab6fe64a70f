//! Read a delimited text file into a table

use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use super::parse_scalar;
use crate::error::Error;
use crate::export::CsvOptions;
use crate::table::{Row, Table};

/// Read a CSV file into a [`Table`]
///
/// With `options.header` on, the first record names the columns; without
/// it, positional names `column_1..column_n` are synthesized from the
/// first record's width.
pub fn read_csv_table(path: &Path, options: &CsvOptions) -> Result<Table> {
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

    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.header)
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut columns: Vec<String> = if options.header {
        reader
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(|name| name.to_string())
            .collect()
    } else {
        Vec::new()
    };

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result
            .with_context(|| format!("Failed to read CSV record in {}", path.display()))?;

        if columns.is_empty() {
            columns = (1..=record.len()).map(|i| format!("column_{}", i)).collect();
        }

        let mut row = Row::new();
        for (column, text) in columns.iter().zip(record.iter()) {
            let value = parse_scalar(text);
            if !value.is_null() {
                row.insert(column.clone(), value);
            }
        }
        rows.push(row);
    }

    log::debug!("read {} rows from {}", rows.len(), path.display());
    Ok(Table::from_rows(columns, rows))
}
