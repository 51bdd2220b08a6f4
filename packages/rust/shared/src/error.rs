//! Error types for citelens.
//!
//! Library crates use [`CitelensError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! The scoring components themselves never fail; they degrade to empty or
//! neutral results. Errors only come from the edges: config files, input
//! files, and reference-data documents.

use std::path::PathBuf;

/// Top-level error type for all citelens operations.
#[derive(Debug, thiserror::Error)]
pub enum CitelensError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Input document (entity JSON, reference TOML) could not be parsed.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (unknown fact type, empty entity id, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Reference tables could not be loaded.
    #[error("reference data error: {0}")]
    ReferenceData(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CitelensError>;

impl CitelensError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a reference-data error from any displayable message.
    pub fn reference_data(msg: impl Into<String>) -> Self {
        Self::ReferenceData(msg.into())
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
