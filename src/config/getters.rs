//! Getter methods for `MigrateConfig`

use regex::Regex;
use std::time::Duration;

use super::types::{LinkRewrite, MigrateConfig, Workspace};

impl MigrateConfig {
    #[must_use]
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    #[must_use]
    pub fn link_rewrite(&self) -> Option<&LinkRewrite> {
        self.link_rewrite.as_ref()
    }

    #[must_use]
    pub fn notion_token(&self) -> Option<&str> {
        self.notion_token.as_deref()
    }

    #[must_use]
    pub fn notion_api_base(&self) -> &str {
        &self.notion_api_base
    }

    #[must_use]
    pub fn legacy_media_pattern(&self) -> &Regex {
        &self.legacy_media_pattern
    }

    #[must_use]
    pub fn upload_interval(&self) -> Duration {
        self.upload_interval
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    #[must_use]
    pub fn max_image_size(&self) -> usize {
        self.max_image_size
    }
}
