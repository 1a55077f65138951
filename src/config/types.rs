//! Core configuration types for migration runs

use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Literal substring replacement applied to anchor hrefs.
///
/// Only constructed when both sides are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRewrite {
    pub(crate) from: String,
    pub(crate) to: String,
}

impl LinkRewrite {
    /// Returns `None` unless both `from` and `to` are non-empty.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Option<Self> {
        let from = from.into();
        let to = to.into();
        if from.is_empty() || to.is_empty() {
            return None;
        }
        Some(Self { from, to })
    }

    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Replace every literal occurrence of `from` in `href`.
    #[must_use]
    pub fn apply(&self, href: &str) -> String {
        href.replace(&self.from, &self.to)
    }
}

/// Directory layout of a migration working directory
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Metadata CSV output
    pub(crate) csv_dir: PathBuf,
    /// Raw entry HTML, reformed in place
    pub(crate) raw_dir: PathBuf,
    /// Upload pass output
    pub(crate) output_dir: PathBuf,
    /// Archive of images that were uploaded successfully
    pub(crate) images_dir: PathBuf,
    /// Scratch space for downloads in flight
    pub(crate) download_dir: PathBuf,
}

impl Workspace {
    /// Standard layout rooted at `root`: `csv/`, `tmp/`, `html/`, `images/`, `downloads/`
    #[must_use]
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            csv_dir: root.join("csv"),
            raw_dir: root.join("tmp"),
            output_dir: root.join("html"),
            images_dir: root.join("images"),
            download_dir: root.join("downloads"),
        }
    }

    #[must_use]
    pub fn csv_dir(&self) -> &Path {
        &self.csv_dir
    }

    #[must_use]
    pub fn raw_dir(&self) -> &Path {
        &self.raw_dir
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    #[must_use]
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    #[must_use]
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Path of the metadata CSV
    #[must_use]
    pub fn metadata_path(&self) -> PathBuf {
        self.csv_dir.join(crate::utils::METADATA_FILE_NAME)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::under(".")
    }
}

/// Main configuration struct for migration runs
#[derive(Debug, Clone)]
pub struct MigrateConfig {
    pub(crate) workspace: Workspace,

    /// Domain rewrite for internal links, `None` disables the rule
    pub(crate) link_rewrite: Option<LinkRewrite>,

    /// Destination API credential (`token_v2` cookie)
    pub(crate) notion_token: Option<String>,

    /// Base URL of the destination API
    pub(crate) notion_api_base: String,

    /// `img[src]` values matching this are migrated by the upload pass.
    /// Compiled once by the builder.
    pub(crate) legacy_media_pattern: Regex,

    /// Pause between documents in the upload pass
    pub(crate) upload_interval: Duration,

    /// Timeout applied to each download and upload request
    pub(crate) request_timeout: Duration,

    /// Downloads larger than this are abandoned
    pub(crate) max_image_size: usize,
}
