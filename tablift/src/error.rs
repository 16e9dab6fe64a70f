//! Error taxonomy for export, load and upload operations

use std::path::PathBuf;

/// Typed failure raised by parameter checks, local file checks and adapter
/// calls
///
/// The parameter and format variants are preconditions: they abort the
/// operation that raised them and are never subject to the per-slice
/// suppression policy. `ExternalService` is the variant adapter
/// implementations use to surface a managed-service failure.
#[derive(Debug)]
pub enum Error {
    /// Parameter failed a range or mode-code check
    InvalidParameter { message: String },
    /// Local path does not exist
    NotFound { path: PathBuf },
    /// Local path exists but is not a regular file
    NotAFile { path: PathBuf },
    /// Extension is outside the recognized format set
    UnsupportedFormat { extension: String },
    /// Failure reported by the warehouse or object-store service
    ExternalService { operation: String, message: String },
}

impl Error {
    /// Shorthand for an `InvalidParameter` with a preformatted message
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            message: message.into(),
        }
    }

    /// Shorthand for an `ExternalService` failure
    pub fn external(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ExternalService {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidParameter { message } => write!(f, "invalid parameter: {}", message),
            Error::NotFound { path } => write!(f, "{} not found", path.display()),
            Error::NotAFile { path } => write!(f, "{} is not a file", path.display()),
            Error::UnsupportedFormat { extension } => {
                write!(f, "unsupported file type '{}'", extension)
            }
            Error::ExternalService { operation, message } => {
                write!(f, "{} failed: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for Error {}
