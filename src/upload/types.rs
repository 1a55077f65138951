//! Type definitions for image migration

use std::path::PathBuf;

/// Step of the per-image pipeline that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    Download,
    Upload,
    Archive,
}

impl std::fmt::Display for FailureStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureStage::Download => write!(f, "download"),
            FailureStage::Upload => write!(f, "upload"),
            FailureStage::Archive => write!(f, "archive"),
        }
    }
}

/// Errors fetching a legacy image into the scratch directory
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("image exceeds size limit: {size} bytes (max: {limit})")]
    TooLarge { size: u64, limit: usize },

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors handing an image to the destination asset store
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{step} responded with status {status}")]
    Status {
        step: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single image that could not be migrated; its `src` was left untouched
#[derive(Debug, Clone)]
pub struct ImageFailure {
    pub url: String,
    pub stage: FailureStage,
    pub error: String,
}

impl std::fmt::Display for ImageFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed for {}: {}", self.stage, self.url, self.error)
    }
}

/// Outcome of migrating the images of one document
#[derive(Debug, Clone, Default)]
pub struct ImageMigrationResult {
    pub successes: usize,
    pub failures: Vec<ImageFailure>,
}

impl ImageMigrationResult {
    /// Total number of images attempted
    #[must_use]
    pub fn total(&self) -> usize {
        self.successes + self.failures.len()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Fold another document's outcome into this one
    pub fn merge(&mut self, other: ImageMigrationResult) {
        self.successes += other.successes;
        self.failures.extend(other.failures);
    }
}
