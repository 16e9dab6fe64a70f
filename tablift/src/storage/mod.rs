//! Object-store adapter interface and upload preflight checks
//!
//! The store itself is a managed service; this module validates formats
//! and local files, shapes object paths and delegates the transfer to a
//! caller-supplied client.

use std::path::Path;

use anyhow::Result;

use crate::error::Error;
use crate::export::Artifact;
use crate::formats;

/// Existing-object policy for uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Leave an existing object untouched
    SkipExisting,
    /// Replace the object unconditionally
    Overwrite,
}

impl WriteMode {
    /// Map a single-letter mode code: `'i'` ignores existing objects,
    /// `'t'` truncates them
    pub fn from_mode_code(code: char) -> Result<Self> {
        match code {
            'i' => Ok(WriteMode::SkipExisting),
            't' => Ok(WriteMode::Overwrite),
            other => Err(Error::invalid_parameter(format!(
                "'{}' is not recognised. Use 'i' for ignore or 't' for truncate",
                other
            ))
            .into()),
        }
    }
}

/// Blocking client for the managed object store
///
/// Implementations wrap the vendor SDK and surface failures as
/// [`Error::ExternalService`](crate::error::Error).
pub trait ObjectStore {
    /// Whether an object already exists at `path` in `bucket`
    fn exists(&self, bucket: &str, path: &str) -> Result<bool>;

    /// Upload a local file
    fn upload_file(
        &self,
        bucket: &str,
        path: &str,
        local: &Path,
        content_type: &str,
    ) -> Result<()>;

    /// Upload an in-memory payload
    fn upload_buffer(
        &self,
        bucket: &str,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<()>;
}

/// Join a bucket directory and an object name
fn object_path(dir_path: &str, name: &str) -> String {
    let dir = dir_path.trim_end_matches('/');
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Upload one local file, skipping or overwriting per `mode`
///
/// Extension, existence and regular-file checks all run before the store
/// is contacted.
pub fn upload_file(
    store: &dyn ObjectStore,
    bucket: &str,
    dir_path: &str,
    local_path: &Path,
    mode: WriteMode,
) -> Result<()> {
    let file_name = local_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::invalid_parameter(format!("'{}' has no file name", local_path.display()))
        })?;
    let descriptor = formats::descriptor_for_name(file_name)?;

    if !local_path.exists() {
        return Err(Error::NotFound {
            path: local_path.to_path_buf(),
        }
        .into());
    }
    if !local_path.is_file() {
        return Err(Error::NotAFile {
            path: local_path.to_path_buf(),
        }
        .into());
    }

    let path = object_path(dir_path, file_name);
    if mode == WriteMode::SkipExisting && store.exists(bucket, &path)? {
        log::info!("skipping {} as it already exists", path);
        return Ok(());
    }

    store.upload_file(bucket, &path, local_path, descriptor.content_type)?;
    log::info!(
        "uploaded {} {} to {}/{}",
        descriptor.label,
        local_path.display(),
        bucket,
        path
    );
    Ok(())
}

/// Upload in-memory artifacts, skipping or overwriting per `mode`
///
/// Every artifact name is validated against the format registry before
/// the first transfer; one bad name means no object is touched.
pub fn upload_artifacts(
    store: &dyn ObjectStore,
    bucket: &str,
    dir_path: &str,
    artifacts: &[Artifact],
    mode: WriteMode,
) -> Result<()> {
    let mut descriptors = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        descriptors.push(formats::descriptor_for_name(&artifact.name)?);
    }

    for (artifact, descriptor) in artifacts.iter().zip(descriptors) {
        let path = object_path(dir_path, &artifact.name);
        if mode == WriteMode::SkipExisting && store.exists(bucket, &path)? {
            log::info!("skipping {} as it already exists", path);
            continue;
        }

        store.upload_buffer(bucket, &path, &artifact.payload, descriptor.content_type)?;
        log::info!(
            "uploaded {} {} to {}/{}",
            descriptor.label,
            artifact.name,
            bucket,
            path
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use tempfile::TempDir;

    /// Store fake that records calls and reports a fixed set of existing
    /// objects
    #[derive(Default)]
    struct RecordingStore {
        existing: HashSet<String>,
        uploads: RefCell<Vec<(String, String)>>,
        exists_checks: RefCell<Vec<String>>,
    }

    impl RecordingStore {
        fn with_existing(paths: &[&str]) -> Self {
            Self {
                existing: paths.iter().map(|p| p.to_string()).collect(),
                ..Self::default()
            }
        }
    }

    impl ObjectStore for RecordingStore {
        fn exists(&self, _bucket: &str, path: &str) -> Result<bool> {
            self.exists_checks.borrow_mut().push(path.to_string());
            Ok(self.existing.contains(path))
        }

        fn upload_file(
            &self,
            _bucket: &str,
            path: &str,
            _local: &Path,
            content_type: &str,
        ) -> Result<()> {
            self.uploads
                .borrow_mut()
                .push((path.to_string(), content_type.to_string()));
            Ok(())
        }

        fn upload_buffer(
            &self,
            _bucket: &str,
            path: &str,
            _bytes: &[u8],
            content_type: &str,
        ) -> Result<()> {
            self.uploads
                .borrow_mut()
                .push((path.to_string(), content_type.to_string()));
            Ok(())
        }
    }

    fn artifact(name: &str) -> Artifact {
        Artifact {
            name: name.to_string(),
            payload: b"id\n1\n".to_vec(),
        }
    }

    #[test]
    fn test_mode_codes() {
        assert_eq!(
            WriteMode::from_mode_code('i').unwrap(),
            WriteMode::SkipExisting
        );
        assert_eq!(WriteMode::from_mode_code('t').unwrap(), WriteMode::Overwrite);
        let error = WriteMode::from_mode_code('a').unwrap_err();
        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_upload_artifacts_overwrite() {
        let store = RecordingStore::default();
        let artifacts = vec![artifact("out_1.csv"), artifact("out_2.csv")];

        upload_artifacts(&store, "bkt", "backups/terms", &artifacts, WriteMode::Overwrite)
            .unwrap();

        let uploads = store.uploads.borrow();
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[0].0, "backups/terms/out_1.csv");
        assert_eq!(uploads[0].1, "text/csv");
        // Overwrite never consults the existence check
        assert!(store.exists_checks.borrow().is_empty());
    }

    #[test]
    fn test_upload_artifacts_skips_existing() {
        let store = RecordingStore::with_existing(&["backups/out_1.csv"]);
        let artifacts = vec![artifact("out_1.csv"), artifact("out_2.csv")];

        upload_artifacts(&store, "bkt", "backups/", &artifacts, WriteMode::SkipExisting)
            .unwrap();

        let uploads = store.uploads.borrow();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].0, "backups/out_2.csv");
    }

    #[test]
    fn test_unsupported_artifact_blocks_whole_batch() {
        let store = RecordingStore::default();
        let artifacts = vec![artifact("out_1.csv"), artifact("out_2.json")];

        let error =
            upload_artifacts(&store, "bkt", "backups", &artifacts, WriteMode::Overwrite)
                .unwrap_err();

        match error.downcast_ref::<Error>() {
            Some(Error::UnsupportedFormat { extension }) => assert_eq!(extension, ".json"),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
        // No network call of any kind
        assert!(store.uploads.borrow().is_empty());
        assert!(store.exists_checks.borrow().is_empty());
    }

    #[test]
    fn test_empty_dir_path_uses_bare_name() {
        let store = RecordingStore::default();
        upload_artifacts(&store, "bkt", "", &[artifact("out.csv")], WriteMode::Overwrite)
            .unwrap();
        assert_eq!(store.uploads.borrow()[0].0, "out.csv");
    }

    #[test]
    fn test_upload_file_checks_local_path() {
        let store = RecordingStore::default();
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("gone.csv");
        let error = upload_file(&store, "bkt", "dir", &missing, WriteMode::Overwrite).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::NotFound { .. })
        ));

        let subdir = dir.path().join("sub.csv");
        std::fs::create_dir(&subdir).unwrap();
        let error = upload_file(&store, "bkt", "dir", &subdir, WriteMode::Overwrite).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::NotAFile { .. })
        ));

        assert!(store.uploads.borrow().is_empty());
    }

    #[test]
    fn test_upload_file_sends_content_type() {
        let store = RecordingStore::default();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.xlsx");
        std::fs::write(&path, b"fake workbook").unwrap();

        upload_file(&store, "bkt", "exports", &path, WriteMode::Overwrite).unwrap();

        let uploads = store.uploads.borrow();
        assert_eq!(uploads[0].0, "exports/report.xlsx");
        assert_eq!(
            uploads[0].1,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }

    #[test]
    fn test_upload_file_unsupported_extension() {
        let store = RecordingStore::default();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.parquet");
        std::fs::write(&path, b"x").unwrap();

        let error = upload_file(&store, "bkt", "", &path, WriteMode::Overwrite).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::UnsupportedFormat { .. })
        ));
        assert!(store.uploads.borrow().is_empty());
    }
}
