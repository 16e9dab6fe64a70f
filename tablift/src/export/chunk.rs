//! Chunked artifact writer: slice a table into numbered serialized outputs

use anyhow::Result;

use crate::error::Error;
use crate::formats;
use crate::table::{Row, Table};

/// Upper bound on rows per slice, matching the warehouse export limit
pub const MAX_SLICE_ROWS: usize = 1_000_000;

/// One serialized output unit, named and ready for a file or bucket write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// File-style name carrying the slice suffix and extension
    pub name: String,
    /// Serialized slice bytes
    pub payload: Vec<u8>,
}

/// Per-slice failure policy
///
/// Applies to serialization failures only; parameter checks abort the call
/// regardless of the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnSliceError {
    /// First failure aborts the call and discards the partial artifact list
    Abort,
    /// Failures are logged and the slice is left out of the result
    Skip,
}

/// Validate a slice size against the accepted range
pub fn check_slice_rows(slice_rows: usize) -> Result<()> {
    if slice_rows > MAX_SLICE_ROWS {
        return Err(Error::invalid_parameter(format!(
            "slice size {} exceeds the maximum of {}",
            slice_rows, MAX_SLICE_ROWS
        ))
        .into());
    }
    Ok(())
}

/// Slice a table and serialize each slice through the supplied capability
///
/// A `slice_rows` of `0` is the no-chunk sentinel: the whole table becomes
/// one artifact named `base_name` verbatim. Otherwise the k-th window
/// (1-based) is named by inserting `_k` before the extension, so `out.csv`
/// yields `out_1.csv`, `out_2.csv`, and so on. A single window still gets
/// the `_1` suffix.
///
/// An empty table with a non-zero slice size produces an empty result.
pub fn write_chunked<F>(
    table: &Table,
    slice_rows: usize,
    base_name: &str,
    on_error: OnSliceError,
    mut serialize: F,
) -> Result<Vec<Artifact>>
where
    F: FnMut(&[String], &[Row]) -> Result<Vec<u8>>,
{
    check_slice_rows(slice_rows)?;

    let extension = formats::extension_of(base_name).ok_or_else(|| {
        Error::invalid_parameter(format!("artifact name '{}' has no extension", base_name))
    })?;
    let stem = &base_name[..base_name.len() - extension.len()];

    if slice_rows == 0 {
        match serialize(table.columns(), table.rows()) {
            Ok(payload) => {
                log::debug!("{} serialized ({} rows)", base_name, table.row_count());
                return Ok(vec![Artifact {
                    name: base_name.to_string(),
                    payload,
                }]);
            }
            Err(error) => {
                log::warn!("failed to serialize {}: {:#}", base_name, error);
                return match on_error {
                    OnSliceError::Abort => Err(error),
                    OnSliceError::Skip => Ok(Vec::new()),
                };
            }
        }
    }

    let mut artifacts = Vec::new();
    for (index, window) in table.rows().chunks(slice_rows).enumerate() {
        // Name derived from the window index up front, so the failure path
        // never depends on loop state left over from a previous window.
        let name = format!("{}_{}{}", stem, index + 1, extension);

        match serialize(table.columns(), window) {
            Ok(payload) => {
                log::debug!("{} serialized ({} rows)", name, window.len());
                artifacts.push(Artifact { name, payload });
            }
            Err(error) => {
                log::warn!("failed to serialize {}: {:#}", name, error);
                match on_error {
                    OnSliceError::Abort => return Err(error),
                    OnSliceError::Skip => continue,
                }
            }
        }
    }

    Ok(artifacts)
}
