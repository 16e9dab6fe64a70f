//! Warehouse adapter interface and load/query plumbing
//!
//! The warehouse itself is a managed service; this module shapes
//! parameters, validates mode codes and delegates to a caller-supplied
//! client. Nothing here retries, paginates or speaks a wire protocol.

pub mod load;
pub mod query;

pub use load::{load_table, load_uri};
pub use query::{read_query_file, run_query_file};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::table::Table;

/// Warehouse load mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disposition {
    /// Preserve existing rows
    Append,
    /// Replace all rows
    Truncate,
}

impl Disposition {
    /// Map a single-letter mode code to a disposition
    pub fn from_mode_code(code: char) -> Result<Self> {
        match code {
            'a' => Ok(Disposition::Append),
            't' => Ok(Disposition::Truncate),
            other => Err(Error::invalid_parameter(format!(
                "'{}' is not recognised. Use 'a' for append or 't' for truncate",
                other
            ))
            .into()),
        }
    }
}

/// Source format of a load that reads from the object store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    Csv,
    Excel,
}

/// Column type for an explicit load schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    String,
    Integer,
    Float,
    Boolean,
    DateTime,
}

/// One column of an explicit load schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnType,
    /// Whether the column rejects nulls
    pub required: bool,
}

impl ColumnSpec {
    /// Nullable column of the given type
    pub fn nullable(name: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }
}

/// Load job parameters handed to the adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadConfig {
    pub disposition: Disposition,
    /// Explicit column list; absent means the service infers one
    pub schema: Option<Vec<ColumnSpec>>,
    pub autodetect: bool,
    /// Set for loads that read a serialized object rather than rows
    pub source_format: Option<SourceFormat>,
    /// Header rows the service skips when reading delimited objects
    pub skip_leading_rows: Option<u32>,
}

/// Outcome summary returned by the adapter for a completed load job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReport {
    pub job_id: String,
    pub rows_written: u64,
}

/// What a load job reads from
#[derive(Debug, Clone, Copy)]
pub enum LoadSource<'a> {
    /// In-memory rows
    Rows(&'a Table),
    /// Bucket path of a serialized object, without a URI scheme
    Uri(&'a str),
}

/// Blocking client for the managed warehouse service
///
/// Implementations wrap the vendor SDK. Every method blocks until the
/// service completes and surfaces failures as
/// [`Error::ExternalService`](crate::error::Error).
pub trait WarehouseClient {
    /// Execute a query and materialize the full result set
    fn run_query(&self, sql: &str) -> Result<Table>;

    /// Start a load job and block until it completes
    fn load_table(
        &self,
        source: LoadSource<'_>,
        destination: &str,
        config: &LoadConfig,
    ) -> Result<JobReport>;
}
