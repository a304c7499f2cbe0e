//! Error types for Scribe
//!
//! Provides a unified error type for all store operations.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias using ScribeError
pub type Result<T> = std::result::Result<T, ScribeError>;

/// Unified error type for Scribe operations
#[derive(Debug, Error)]
pub enum ScribeError {
    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Unable to find file or directory '{}'", path.display())]
    NotFound { path: PathBuf },

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode record: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ScribeError {
    /// Build a `NotFound` error for the given path
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ScribeError::NotFound { path: path.into() }
    }

    /// Returns a closure that wraps an `io::Error` with the path it happened on.
    ///
    /// Intended for `map_err`: `fs::read(&p).map_err(ScribeError::io(&p))?`
    pub fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| ScribeError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True for `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScribeError::NotFound { .. })
    }

    /// The filesystem path the error refers to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ScribeError::NotFound { path }
            | ScribeError::Io { path, .. }
            | ScribeError::Decode { path, .. } => Some(path),
            ScribeError::InvalidArgument(_) | ScribeError::Encode(_) => None,
        }
    }
}
