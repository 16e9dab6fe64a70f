//! Excel artifact serialization and the Excel export compositions

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use super::chunk::{Artifact, OnSliceError, check_slice_rows, write_chunked};
use super::{DirCleanup, write_artifact_files};
use crate::table::{Row, Table, Value};
use crate::warehouse::WarehouseClient;

/// Per-call Excel shape options
#[derive(Debug, Clone)]
pub struct ExcelOptions {
    /// Worksheet name; the writer default is used when absent
    pub sheet_name: Option<String>,
    /// Whether the sheet starts with a header row
    pub header: bool,
}

impl Default for ExcelOptions {
    fn default() -> Self {
        Self {
            sheet_name: None,
            header: true,
        }
    }
}

/// Serialize one slice of rows as a single-sheet workbook
pub fn excel_bytes(columns: &[String], rows: &[Row], options: &ExcelOptions) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    if let Some(ref name) = options.sheet_name {
        worksheet.set_name(name)?;
    }

    let mut row_index: u32 = 0;
    if options.header {
        for (col, name) in columns.iter().enumerate() {
            worksheet.write_string(0, col as u16, name)?;
        }
        row_index = 1;
    }

    for row in rows {
        for (col_idx, column) in columns.iter().enumerate() {
            if let Some(value) = row.get(column) {
                write_value(worksheet, row_index, col_idx as u16, value)?;
            }
        }
        row_index += 1;
    }

    workbook
        .save_to_buffer()
        .context("Failed to build Excel buffer")
}

fn write_value(ws: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<()> {
    match value {
        Value::Null => { /* leave cell empty */ }
        Value::String(s) => {
            ws.write_string(row, col, s)?;
        }
        Value::Int(i) => {
            ws.write_number(row, col, *i as f64)?;
        }
        Value::Float(f) => {
            ws.write_number(row, col, *f)?;
        }
        Value::Bool(b) => {
            ws.write_string(row, col, b.to_string())?;
        }
        Value::DateTime(dt) => {
            ws.write_string(row, col, dt.to_rfc3339())?;
        }
    }
    Ok(())
}

/// Chunk a table into Excel workbook buffers named from `base_name`
pub fn table_to_excel_buffers(
    table: &Table,
    slice_rows: usize,
    base_name: &str,
    options: &ExcelOptions,
    on_error: OnSliceError,
) -> Result<Vec<Artifact>> {
    write_chunked(table, slice_rows, base_name, on_error, |columns, rows| {
        excel_bytes(columns, rows, options)
    })
}

/// Chunk a table into Excel files under `dir`
pub fn table_to_excel_files(
    table: &Table,
    dir: &Path,
    slice_rows: usize,
    base_name: &str,
    options: &ExcelOptions,
    on_error: OnSliceError,
    cleanup: DirCleanup,
) -> Result<Vec<PathBuf>> {
    // Slice bound checked before any filesystem work
    check_slice_rows(slice_rows)?;
    let artifacts = table_to_excel_buffers(table, slice_rows, base_name, options, on_error)?;
    write_artifact_files(&artifacts, dir, cleanup)
}

/// Run a query and chunk the result into Excel workbook buffers
pub fn query_to_excel_buffers(
    client: &dyn WarehouseClient,
    sql: &str,
    slice_rows: usize,
    base_name: &str,
    options: &ExcelOptions,
    on_error: OnSliceError,
) -> Result<Vec<Artifact>> {
    // Slice bound checked before the query runs
    check_slice_rows(slice_rows)?;
    let table = client.run_query(sql)?;
    table_to_excel_buffers(&table, slice_rows, base_name, options, on_error)
}

/// Run a query and chunk the result into Excel files under `dir`
pub fn query_to_excel_files(
    client: &dyn WarehouseClient,
    sql: &str,
    dir: &Path,
    slice_rows: usize,
    base_name: &str,
    options: &ExcelOptions,
    on_error: OnSliceError,
    cleanup: DirCleanup,
) -> Result<Vec<PathBuf>> {
    check_slice_rows(slice_rows)?;
    let table = client.run_query(sql)?;
    table_to_excel_files(&table, dir, slice_rows, base_name, options, on_error, cleanup)
}
