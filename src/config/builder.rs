//! Fluent builder for `MigrateConfig`
//!
//! Every field has a default, so `MigrateConfig::builder().build()` yields a
//! configuration rooted at the current directory with link rewriting and
//! uploads disabled.

use regex::Regex;
use std::path::PathBuf;
use std::time::Duration;

use super::types::{LinkRewrite, MigrateConfig, Workspace};
use crate::error::{MigrateError, Result};
use crate::utils::{
    DEFAULT_LEGACY_MEDIA_PATTERN, DEFAULT_MAX_IMAGE_SIZE, DEFAULT_NOTION_API_BASE,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_UPLOAD_INTERVAL,
};

/// Compile the legacy media host pattern
///
/// # Errors
///
/// Returns `MigrateError::Config` if the pattern is not a valid regex.
fn compile_media_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| MigrateError::Config(format!("invalid legacy media pattern '{pattern}': {e}")))
}

#[derive(Debug, Clone)]
pub struct MigrateConfigBuilder {
    workspace: Workspace,
    link_rewrite: Option<LinkRewrite>,
    notion_token: Option<String>,
    notion_api_base: String,
    legacy_media_pattern: String,
    upload_interval: Duration,
    request_timeout: Duration,
    max_image_size: usize,
}

impl Default for MigrateConfigBuilder {
    fn default() -> Self {
        Self {
            workspace: Workspace::default(),
            link_rewrite: None,
            notion_token: None,
            notion_api_base: DEFAULT_NOTION_API_BASE.to_string(),
            legacy_media_pattern: DEFAULT_LEGACY_MEDIA_PATTERN.to_string(),
            upload_interval: DEFAULT_UPLOAD_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_image_size: DEFAULT_MAX_IMAGE_SIZE,
        }
    }
}

impl MigrateConfig {
    /// Create a builder with default settings
    #[must_use]
    pub fn builder() -> MigrateConfigBuilder {
        MigrateConfigBuilder::default()
    }
}

impl MigrateConfigBuilder {
    /// Root the standard directory layout at `dir`
    #[must_use]
    pub fn work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workspace = Workspace::under(dir.into());
        self
    }

    #[must_use]
    pub fn workspace(mut self, workspace: Workspace) -> Self {
        self.workspace = workspace;
        self
    }

    /// Enable href rewriting. Ignored unless both strings are non-empty.
    #[must_use]
    pub fn link_rewrite(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.link_rewrite = LinkRewrite::new(from, to);
        self
    }

    /// Same as `link_rewrite`, accepting the optional values the CLI produces
    #[must_use]
    pub fn link_rewrite_opt(self, from: Option<String>, to: Option<String>) -> Self {
        match (from, to) {
            (Some(from), Some(to)) => self.link_rewrite(from, to),
            _ => Self {
                link_rewrite: None,
                ..self
            },
        }
    }

    #[must_use]
    pub fn notion_token(mut self, token: Option<String>) -> Self {
        self.notion_token = token.filter(|t| !t.is_empty());
        self
    }

    #[must_use]
    pub fn notion_api_base(mut self, base: impl Into<String>) -> Self {
        self.notion_api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn legacy_media_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.legacy_media_pattern = pattern.into();
        self
    }

    #[must_use]
    pub fn upload_interval(mut self, interval: Duration) -> Self {
        self.upload_interval = interval;
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn max_image_size(mut self, bytes: usize) -> Self {
        self.max_image_size = bytes;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the legacy media pattern does not compile.
    pub fn build(self) -> Result<MigrateConfig> {
        let legacy_media_pattern = compile_media_pattern(&self.legacy_media_pattern)?;

        Ok(MigrateConfig {
            workspace: self.workspace,
            link_rewrite: self.link_rewrite,
            notion_token: self.notion_token,
            notion_api_base: self.notion_api_base,
            legacy_media_pattern,
            upload_interval: self.upload_interval,
            request_timeout: self.request_timeout,
            max_image_size: self.max_image_size,
        })
    }
}
