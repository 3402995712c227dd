//! Error types for h5tui.

use std::path::PathBuf;

use crate::store::StoreError;

/// Result type alias for h5tui operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the navigation boundary.
///
/// Store failures hit while browsing are swallowed by the controller; the
/// variants here surface at startup, in the non-interactive commands, and
/// in the terminal front end.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        /// The path where the error occurred, if known.
        path: Option<PathBuf>,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON tree document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Store error outside the navigation boundary.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Terminal setup, drawing or input failure.
    #[error("Terminal error: {message}")]
    Terminal {
        /// Description of the terminal failure.
        message: String,
    },

    /// Unsupported file format.
    #[error("Unsupported format: {format}")]
    UnsupportedFormat {
        /// The unsupported format name or extension.
        format: String,
    },

    /// A string that is not a valid absolute node path.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The rejected input.
        path: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Inconsistent array payload (shape/length mismatch, bad element type).
    #[error("Data error: {message}")]
    Data {
        /// Description of the data error.
        message: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },
}

impl Error {
    /// Create an I/O error with a path context.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            path: Some(path.into()),
            source,
        }
    }

    /// Create an I/O error without path context.
    pub fn io_no_path(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }

    /// Create a terminal error.
    pub fn terminal(message: impl std::fmt::Display) -> Self {
        Self::Terminal {
            message: message.to_string(),
        }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create an invalid path error.
    pub fn invalid_path(path: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason,
        }
    }

    /// Create a data error.
    pub fn data(message: impl Into<String>) -> Self {
        Self::Data {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
