//! Moves legacy-hosted images to the destination asset store
//!
//! Every `img` whose `src` matches the legacy host pattern goes through
//! download → upload → archive, one image at a time. A failure at any step
//! is recorded and leaves that image's `src` exactly as it was.

use std::path::{Path, PathBuf};

use markup5ever_rcdom::Handle;
use regex::Regex;

use super::downloaders::ImageDownloader;
use super::notion::NotionClient;
use super::types::{FailureStage, ImageFailure, ImageMigrationResult};
use crate::dom::{attr, elements_preorder, is_element, set_attr};

/// `img` elements under `root` whose `src` matches `pattern`, in document
/// order, paired with that `src`.
pub fn legacy_images(root: &Handle, pattern: &Regex) -> Vec<(Handle, String)> {
    elements_preorder(root)
        .into_iter()
        .filter(|node| is_element(node, "img"))
        .filter_map(|node| {
            let src = attr(&node, "src")?;
            pattern.is_match(&src).then_some((node, src))
        })
        .collect()
}

pub struct ImageMigrator<'a> {
    downloader: &'a ImageDownloader,
    uploader: &'a NotionClient,
    legacy_pattern: &'a Regex,
    download_dir: &'a Path,
    images_dir: &'a Path,
}

impl<'a> ImageMigrator<'a> {
    pub fn new(
        downloader: &'a ImageDownloader,
        uploader: &'a NotionClient,
        legacy_pattern: &'a Regex,
        download_dir: &'a Path,
        images_dir: &'a Path,
    ) -> Self {
        Self {
            downloader,
            uploader,
            legacy_pattern,
            download_dir,
            images_dir,
        }
    }

    /// Migrate every legacy image under `root`, rewriting `src` in place
    /// for the ones that succeed.
    pub async fn migrate(&self, root: &Handle) -> ImageMigrationResult {
        let mut result = ImageMigrationResult::default();

        for (img, src) in legacy_images(root, self.legacy_pattern) {
            match self.migrate_one(&src).await {
                Ok(new_src) => {
                    set_attr(&img, "src", &new_src);
                    log::info!("Migrated image {src} -> {new_src}");
                    result.successes += 1;
                }
                Err(failure) => {
                    log::warn!("{failure}");
                    result.failures.push(failure);
                }
            }
        }

        result
    }

    async fn migrate_one(&self, src: &str) -> Result<String, ImageFailure> {
        let failure = |stage, error: String| ImageFailure {
            url: src.to_string(),
            stage,
            error,
        };

        let local = self
            .downloader
            .download(src, self.download_dir)
            .await
            .map_err(|e| failure(FailureStage::Download, e.to_string()))?;

        let archived = match self.uploader.upload_file(&local).await {
            Ok(new_src) => self
                .archive(&local)
                .await
                .map(|_| new_src)
                .map_err(|e| failure(FailureStage::Archive, e.to_string())),
            Err(e) => Err(failure(FailureStage::Upload, e.to_string())),
        };

        if archived.is_err() {
            // Only archived images keep a local copy
            let _ = tokio::fs::remove_file(&local).await;
        }
        archived
    }

    /// Move an uploaded scratch file into the images directory.
    async fn archive(&self, local: &Path) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(self.images_dir).await?;
        let file_name = local
            .file_name()
            .ok_or_else(|| std::io::Error::other("downloaded path has no file name"))?;
        let target = self.images_dir.join(file_name);
        tokio::fs::rename(local, &target).await?;
        Ok(target)
    }
}
