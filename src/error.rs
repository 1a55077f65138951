//! Fatal error types for migration runs
//!
//! Anything in here aborts the whole run. Per-image failures during the
//! upload pass live in `upload::types` and never reach this enum.

use std::path::PathBuf;

/// Errors that stop a migration run
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// Input file or directory could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Working directory could not be listed
    #[error("failed to list {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output directory could not be created
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export file does not follow the Movable Type format
    #[error("malformed export at line {line}: {message}")]
    Export { line: usize, message: String },

    /// Metadata CSV could not be written
    #[error("failed to write metadata: {0}")]
    Metadata(#[from] csv::Error),

    /// A document tree could not be serialized back to HTML
    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid or missing configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl MigrateError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = MigrateError> = std::result::Result<T, E>;
