//! Content-type registry for the recognized artifact formats

use std::collections::HashMap;

use anyhow::Result;
use once_cell::sync::Lazy;

use crate::error::Error;

/// Content type and display label for one recognized extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    /// MIME content type sent with object-store uploads
    pub content_type: &'static str,
    /// Short label used in log lines
    pub label: &'static str,
}

/// Extension to descriptor table, fixed for the lifetime of the process
static FORMATS: Lazy<HashMap<&'static str, FormatDescriptor>> = Lazy::new(|| {
    HashMap::from([
        (
            ".csv",
            FormatDescriptor {
                content_type: "text/csv",
                label: "CSV",
            },
        ),
        (
            ".txt",
            FormatDescriptor {
                content_type: "text/plain",
                label: "Text",
            },
        ),
        (
            ".xlsx",
            FormatDescriptor {
                content_type:
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                label: "Excel",
            },
        ),
        (
            ".log",
            FormatDescriptor {
                content_type: "text/plain",
                label: "Log",
            },
        ),
    ])
});

/// Look up the descriptor for an extension such as `.csv`
pub fn descriptor_for(extension: &str) -> Result<&'static FormatDescriptor> {
    FORMATS.get(extension).ok_or_else(|| {
        Error::UnsupportedFormat {
            extension: extension.to_string(),
        }
        .into()
    })
}

/// Extension of a file name, including the leading dot
///
/// A name without an extension (or a bare dotfile) yields `None`.
pub fn extension_of(name: &str) -> Option<&str> {
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < name.len() => Some(&name[idx..]),
        _ => None,
    }
}

/// Look up the descriptor for a file or artifact name
pub fn descriptor_for_name(name: &str) -> Result<&'static FormatDescriptor> {
    descriptor_for(extension_of(name).unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_recognized_extensions() {
        assert_eq!(descriptor_for(".csv").unwrap().content_type, "text/csv");
        assert_eq!(descriptor_for(".txt").unwrap().label, "Text");
        assert_eq!(descriptor_for(".log").unwrap().content_type, "text/plain");
        assert_eq!(descriptor_for(".xlsx").unwrap().label, "Excel");
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let error = descriptor_for(".json").unwrap_err();
        match error.downcast_ref::<Error>() {
            Some(Error::UnsupportedFormat { extension }) => assert_eq!(extension, ".json"),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("out.csv"), Some(".csv"));
        assert_eq!(extension_of("report_2.xlsx"), Some(".xlsx"));
        assert_eq!(extension_of("archive.tar.gz"), Some(".gz"));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of(".csv"), None);
        assert_eq!(extension_of("trailing."), None);
    }

    #[test]
    fn test_descriptor_for_name() {
        assert_eq!(descriptor_for_name("out_3.csv").unwrap().label, "CSV");
        assert!(descriptor_for_name("noext").is_err());
    }
}
