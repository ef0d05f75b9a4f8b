//! Pack-specific error types.
//!
//! Every variant that concerns a file carries its path so a failing section
//! can be identified from the message alone.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a checklist document.
#[derive(Debug, Error)]
pub enum PackError {
    /// YAML parsing or schema decoding failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing or schema decoding failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A source data file was not found.
    #[error("data file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The format tag is not one of the supported loaders.
    #[error("unknown file type {tag:?}; expected one of: {}", crate::FileType::tags().join(", "))]
    UnknownFormat { tag: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pack operations.
pub type PackResult<T> = Result<T, PackError>;
