//! Error types for strictfs

use std::path::{Path, PathBuf};

/// Result type for strictfs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in strictfs operations.
///
/// Two kinds only: [`Error::NotFound`] when the target path does not point
/// to anything at all, and [`Error::IoFailure`] when the path exists but
/// is the wrong type, lacks a required permission, or the underlying OS
/// call failed. Both kinds carry the offending path for programmatic
/// inspection alongside the human-readable message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target path does not exist at all.
    #[error("Filesystem entity '{}' does not exist", .path.display())]
    NotFound { path: PathBuf },

    /// The path exists but the requested operation could not complete.
    ///
    /// The message is a fixed template naming the operation and the
    /// resolved path; `source` preserves the raw OS error when one was
    /// observed.
    #[error("{message}")]
    IoFailure {
        message: String,
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl Error {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::IoFailure {
            message: message.into(),
            path: path.into(),
            source: None,
        }
    }

    pub fn io_from(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::IoFailure {
            message: message.into(),
            path: path.into(),
            source: Some(source),
        }
    }

    /// The path the failed operation was acting on.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } => path,
            Self::IoFailure { path, .. } => path,
        }
    }

    /// True for the not-found kind, false for every other I/O failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
