use std::path::{Path, PathBuf};

use super::reform_pass::{ReformSummary, run_reform};
use crate::config::MigrateConfig;
use crate::content_saver::{save_entry_html_files, save_metadata};
use crate::error::{MigrateError, Result};
use crate::export::parse_export;

/// Outcome of the extract command
#[derive(Debug, Clone)]
pub struct ExtractSummary {
    pub entries: usize,
    pub metadata_path: PathBuf,
    pub html_files: Vec<PathBuf>,
    pub reform: ReformSummary,
}

/// Parse the export at `export_path`, write the metadata table and one raw
/// HTML file per entry, then reform the raw files.
pub async fn run_extract(config: &MigrateConfig, export_path: &Path) -> Result<ExtractSummary> {
    let workspace = config.workspace();

    let input = tokio::fs::read_to_string(export_path)
        .await
        .map_err(|e| MigrateError::read(export_path, e))?;
    let entries = parse_export(&input)?;
    log::info!(
        "Read {} entries from {}",
        entries.len(),
        export_path.display()
    );

    let metadata_path = workspace.metadata_path();
    save_metadata(&metadata_path, &entries)?;

    let html_files = save_entry_html_files(&entries, workspace.raw_dir()).await?;
    log::info!(
        "Wrote {} entry files to {}",
        html_files.len(),
        workspace.raw_dir().display()
    );

    let reform = run_reform(config).await?;

    Ok(ExtractSummary {
        entries: entries.len(),
        metadata_path,
        html_files,
        reform,
    })
}
