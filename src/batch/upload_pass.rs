use std::path::PathBuf;

use super::files::{display_name, list_html_files};
use crate::config::MigrateConfig;
use crate::dom::Document;
use crate::error::{MigrateError, Result};
use crate::upload::{
    ImageDownloader, ImageMigrationResult, ImageMigrator, NotionClient, ProgressReporter,
};
use crate::utils::USER_AGENT;

/// Outcome of an upload pass
#[derive(Debug, Clone, Default)]
pub struct UploadSummary {
    /// Files written to the output directory
    pub written: Vec<PathBuf>,
    /// Image outcomes across every document
    pub images: ImageMigrationResult,
}

/// Migrate legacy images of every reformed document and write the results
/// to the output directory under the same file names.
///
/// Documents are handled strictly one after another, pausing for the
/// configured interval between them. Image failures are collected in the
/// summary; only I/O on the documents themselves is fatal.
pub async fn run_upload(
    config: &MigrateConfig,
    progress: &dyn ProgressReporter,
) -> Result<UploadSummary> {
    let token = config.notion_token().ok_or_else(|| {
        MigrateError::Config("a Notion token is required for upload".to_string())
    })?;

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.request_timeout())
        .build()?;
    let downloader = ImageDownloader::new(
        client.clone(),
        config.request_timeout(),
        config.max_image_size(),
    );
    let uploader = NotionClient::new(client, config.notion_api_base(), token);

    let workspace = config.workspace();
    let migrator = ImageMigrator::new(
        &downloader,
        &uploader,
        config.legacy_media_pattern(),
        workspace.download_dir(),
        workspace.images_dir(),
    );

    let output_dir = workspace.output_dir();
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| MigrateError::CreateDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

    let files = list_html_files(workspace.raw_dir())?;
    progress.report_started(files.len());

    let mut summary = UploadSummary::default();
    for (index, path) in files.iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(config.upload_interval()).await;
        }

        let name = display_name(path);
        progress.report_document_started(&name);

        let html = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| MigrateError::read(path, e))?;

        let document = Document::parse(&html);
        let result = migrator.migrate(document.root()).await;
        let migrated = document.to_html().map_err(|source| MigrateError::Serialize {
            path: path.clone(),
            source,
        })?;
        drop(document);

        let target = output_dir.join(&name);
        tokio::fs::write(&target, migrated)
            .await
            .map_err(|e| MigrateError::write(&target, e))?;

        log::info!(
            "Uploaded {name}: {} images migrated, {} failed",
            result.successes,
            result.failures.len()
        );
        progress.report_document_finished(&name, &result);
        summary.images.merge(result);
        summary.written.push(target);
    }

    progress.report_completed();
    Ok(summary)
}
