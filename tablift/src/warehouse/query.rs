//! Query text sources: file-backed queries with ordered substitutions

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::WarehouseClient;
use crate::error::Error;
use crate::table::Table;

/// Read a query from a text file, applying literal substitutions in order
///
/// Substitutions are plain find/replace pairs; later pairs see the effect
/// of earlier ones. A query that ends up empty is rejected.
pub fn read_query_file(path: &Path, substitutions: &[(String, String)]) -> Result<String> {
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

    let mut sql = fs::read_to_string(path)
        .with_context(|| format!("Failed to read query file: {}", path.display()))?;

    for (from, to) in substitutions {
        sql = sql.replace(from.as_str(), to);
    }

    if sql.trim().is_empty() {
        return Err(Error::invalid_parameter(format!(
            "query file is empty: {}",
            path.display()
        ))
        .into());
    }

    Ok(sql)
}

/// Run a file-backed query against the warehouse
pub fn run_query_file(
    client: &dyn WarehouseClient,
    path: &Path,
    substitutions: &[(String, String)],
) -> Result<Table> {
    let sql = read_query_file(path, substitutions)?;
    log::debug!("running query from {}", path.display());
    client.run_query(&sql)
}
