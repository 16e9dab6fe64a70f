//! Batch export/import utilities for warehouse tables, object storage and
//! local CSV/Excel artifacts
//!
//! The library moves row-oriented tables between three places: a managed
//! data warehouse (queries and load jobs), a managed object store
//! (uploads), and local or in-memory CSV/Excel artifacts. The recurring
//! piece is the chunked artifact writer: slice a table into fixed-size
//! windows and serialize each window to a numbered artifact, with a
//! per-slice skip-or-abort failure policy.
//!
//! The warehouse and the object store are reached through the
//! [`WarehouseClient`] and [`ObjectStore`] traits; implementations wrap
//! the vendor SDKs and are supplied by the caller. Everything is
//! synchronous and blocking, one slice, upload or query at a time.

pub mod error;
pub mod export;
pub mod formats;
pub mod import;
pub mod storage;
pub mod table;
pub mod warehouse;

pub use error::Error;
pub use export::{
    Artifact, CsvOptions, DirCleanup, ExcelOptions, MAX_SLICE_ROWS, OnSliceError, csv_bytes,
    excel_bytes, query_file_to_csv_buffers, query_to_csv_buffers, query_to_csv_files,
    query_to_excel_buffers, query_to_excel_files, table_to_csv_buffers, table_to_csv_files,
    table_to_excel_buffers, table_to_excel_files, write_chunked,
};
pub use formats::{FormatDescriptor, descriptor_for, descriptor_for_name, extension_of};
pub use import::{read_csv_table, read_excel_table};
pub use storage::{ObjectStore, WriteMode, upload_artifacts, upload_file};
pub use table::{Row, Table, Value};
pub use warehouse::{
    ColumnSpec, ColumnType, Disposition, JobReport, LoadConfig, LoadSource, SourceFormat,
    WarehouseClient, load_table, load_uri, read_query_file, run_query_file,
};
