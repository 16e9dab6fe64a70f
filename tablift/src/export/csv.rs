//! CSV artifact serialization and the CSV export compositions

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::WriterBuilder;

use super::chunk::{Artifact, OnSliceError, check_slice_rows, write_chunked};
use super::{DirCleanup, write_artifact_files};
use crate::table::{Row, Table, Value};
use crate::warehouse::{WarehouseClient, read_query_file};

/// Per-call CSV shape options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter, comma unless overridden
    pub delimiter: u8,
    /// Whether each artifact starts with a header row
    pub header: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            header: true,
        }
    }
}

/// Serialize one slice of rows as delimited UTF-8 text
///
/// Each slice is self-contained: when the header is on, every artifact
/// carries its own header row.
pub fn csv_bytes(columns: &[String], rows: &[Row], options: &CsvOptions) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .from_writer(Vec::new());

    if options.header {
        writer
            .write_record(columns)
            .context("Failed to write CSV header")?;
    }

    for row in rows {
        let record: Vec<String> = columns.iter().map(|column| field_text(row, column)).collect();
        writer
            .write_record(&record)
            .context("Failed to write CSV record")?;
    }

    writer
        .into_inner()
        .map_err(|error| anyhow::anyhow!("Failed to flush CSV writer: {}", error))
}

/// Null cells become empty fields rather than a null marker
fn field_text(row: &Row, column: &str) -> String {
    match row.get(column) {
        None | Some(Value::Null) => String::new(),
        Some(value) => value.to_string(),
    }
}

/// Chunk a table into CSV buffers named from `base_name`
pub fn table_to_csv_buffers(
    table: &Table,
    slice_rows: usize,
    base_name: &str,
    options: &CsvOptions,
    on_error: OnSliceError,
) -> Result<Vec<Artifact>> {
    write_chunked(table, slice_rows, base_name, on_error, |columns, rows| {
        csv_bytes(columns, rows, options)
    })
}

/// Chunk a table into CSV files under `dir`
pub fn table_to_csv_files(
    table: &Table,
    dir: &Path,
    slice_rows: usize,
    base_name: &str,
    options: &CsvOptions,
    on_error: OnSliceError,
    cleanup: DirCleanup,
) -> Result<Vec<PathBuf>> {
    // Slice bound checked before any filesystem work
    check_slice_rows(slice_rows)?;
    let artifacts = table_to_csv_buffers(table, slice_rows, base_name, options, on_error)?;
    write_artifact_files(&artifacts, dir, cleanup)
}

/// Run a query and chunk the result into CSV buffers
pub fn query_to_csv_buffers(
    client: &dyn WarehouseClient,
    sql: &str,
    slice_rows: usize,
    base_name: &str,
    options: &CsvOptions,
    on_error: OnSliceError,
) -> Result<Vec<Artifact>> {
    // Slice bound checked before the query runs
    check_slice_rows(slice_rows)?;
    let table = client.run_query(sql)?;
    table_to_csv_buffers(&table, slice_rows, base_name, options, on_error)
}

/// Run a query and chunk the result into CSV files under `dir`
pub fn query_to_csv_files(
    client: &dyn WarehouseClient,
    sql: &str,
    dir: &Path,
    slice_rows: usize,
    base_name: &str,
    options: &CsvOptions,
    on_error: OnSliceError,
    cleanup: DirCleanup,
) -> Result<Vec<PathBuf>> {
    check_slice_rows(slice_rows)?;
    let table = client.run_query(sql)?;
    table_to_csv_files(&table, dir, slice_rows, base_name, options, on_error, cleanup)
}

/// Run a file-backed query and chunk the result into CSV buffers
///
/// The query text is read from `path` with the ordered substitutions
/// applied before execution.
pub fn query_file_to_csv_buffers(
    client: &dyn WarehouseClient,
    path: &Path,
    substitutions: &[(String, String)],
    slice_rows: usize,
    base_name: &str,
    options: &CsvOptions,
    on_error: OnSliceError,
) -> Result<Vec<Artifact>> {
    check_slice_rows(slice_rows)?;
    let sql = read_query_file(path, substitutions)?;
    let table = client.run_query(&sql)?;
    table_to_csv_buffers(&table, slice_rows, base_name, options, on_error)
}
