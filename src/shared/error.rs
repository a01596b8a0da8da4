use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish between argument errors
/// and failures of the tree build itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - a tree (possibly the empty-state marker) was produced
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (root unresolvable, transport failure, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Failure of a single product fetch against the external product service.
///
/// `NotFound` and `AccessDenied` are normal for cross-organization graphs;
/// `Transport` means the service itself could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("product not found: {id}")]
    NotFound { id: String },

    #[error("access denied to product: {id}")]
    AccessDenied { id: String },

    #[error("transport failure: {details}")]
    Transport { details: String },
}

impl FetchError {
    /// Whether the failure is about the connection rather than the product
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }
}

/// Application-specific errors for traceability tree builds.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Root product could not be resolved: {id}\nReason: {reason}\n\n💡 Hint: Check the product id and that your organization can see it")]
    RootUnresolved { id: String, reason: String },

    #[error("Product service unreachable: {details}\n\n💡 Hint: Please check your network connection and the --api-url setting")]
    Transport { details: String },

    #[error("Catalog file not found: {path}\n\n💡 Hint: {suggestion}")]
    CatalogNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse catalog file: {path}\nDetails: {details}\n\n💡 Hint: The catalog must be a JSON array of products or an object with a \"products\" array")]
    CatalogParseError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl TraceError {
    /// Maps a failed root fetch into the whole-build error it causes
    pub fn from_root_fetch(id: &str, error: FetchError) -> Self {
        match error {
            FetchError::Transport { details } => TraceError::Transport { details },
            other => TraceError::RootUnresolved {
                id: id.to_string(),
                reason: other.to_string(),
            },
        }
    }
}
