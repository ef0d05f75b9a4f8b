//! Empire error types.
//!
//! Configuration, section-load, I/O and database failures are all fatal to
//! the operation in progress. Unknown uids and rejected state tokens are not
//! errors at this level; see [`MarkOutcome`](crate::MarkOutcome).

use std::path::PathBuf;

use thiserror::Error;

use cbx_pack::PackError;

/// Errors raised while loading, mutating or persisting a project.
#[derive(Debug, Error)]
pub enum EmpireError {
    /// The project configuration file does not exist.
    #[error("configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// The project configuration is not valid TOML or misses a required key.
    #[error("invalid configuration {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A configured section failed to load.
    #[error("failed to load section {key:?}: {source}")]
    SectionLoad { key: String, source: PackError },

    /// A tag pattern is not a valid uid glob.
    #[error("invalid uid pattern {pattern:?} for tag {tag:?}: {source}")]
    InvalidPattern {
        tag: String,
        pattern: String,
        source: globset::Error,
    },

    /// The state database could not be decoded.
    #[error("invalid state database {path}: {detail}")]
    DatabaseParse { path: PathBuf, detail: String },

    /// The state database could not be written.
    #[error("failed to write state database {path}: {source}")]
    DatabaseWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Serializing a snapshot or database failed.
    #[error("serialization failed: {0}")]
    Serialize(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for empire operations.
pub type EmpireResult<T> = Result<T, EmpireError>;
