//! Export surface: chunked CSV and Excel artifacts, buffer and file variants

pub mod chunk;
pub mod csv;
pub mod excel;

pub use chunk::{Artifact, MAX_SLICE_ROWS, OnSliceError, check_slice_rows, write_chunked};
pub use csv::{
    CsvOptions, csv_bytes, query_file_to_csv_buffers, query_to_csv_buffers, query_to_csv_files,
    table_to_csv_buffers, table_to_csv_files,
};
pub use excel::{
    ExcelOptions, excel_bytes, query_to_excel_buffers, query_to_excel_files,
    table_to_excel_buffers, table_to_excel_files,
};

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Whether to remove an output directory this export had to create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirCleanup {
    /// Leave the directory and its artifacts in place
    Keep,
    /// Remove the directory after all artifacts are written, if and only if
    /// this export created it
    RemoveCreated,
}

/// Write artifacts under `dir`, creating it (and parents) when absent
pub(crate) fn write_artifact_files(
    artifacts: &[Artifact],
    dir: &Path,
    cleanup: DirCleanup,
) -> Result<Vec<PathBuf>> {
    let created = !dir.exists();
    if created {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let mut paths = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = dir.join(&artifact.name);
        fs::write(&path, &artifact.payload)
            .with_context(|| format!("Failed to write artifact: {}", path.display()))?;
        log::debug!("wrote {} ({} bytes)", path.display(), artifact.payload.len());
        paths.push(path);
    }

    if created && cleanup == DirCleanup::RemoveCreated {
        fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to remove export directory: {}", dir.display()))?;
        log::info!("removed export directory {}", dir.display());
    }

    Ok(paths)
}
