use std::path::PathBuf;

use super::files::{display_name, list_html_files};
use crate::config::MigrateConfig;
use crate::error::{MigrateError, Result};
use crate::reform::{ReviewNotice, reform_html};

/// Outcome of a reform pass over the raw HTML directory
#[derive(Debug, Clone, Default)]
pub struct ReformSummary {
    pub documents: usize,
    /// Documents that were rewritten on disk
    pub rewritten: Vec<PathBuf>,
    pub notices: Vec<ReviewNotice>,
}

/// Reform every HTML file in the raw directory in place, one at a time.
///
/// Files no rule changes are left byte-for-byte as they were.
pub async fn run_reform(config: &MigrateConfig) -> Result<ReformSummary> {
    let mut summary = ReformSummary::default();

    for path in list_html_files(config.workspace().raw_dir())? {
        let name = display_name(&path);
        let html = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| MigrateError::read(&path, e))?;

        let (reformed, report) = reform_html(&html, &name, config.link_rewrite())
            .map_err(|source| MigrateError::Serialize {
                path: path.clone(),
                source,
            })?;

        summary.documents += 1;
        summary.notices.extend(report.notices.iter().cloned());
        if report.is_unchanged() {
            log::debug!("{name}: nothing to reform");
            continue;
        }

        tokio::fs::write(&path, reformed)
            .await
            .map_err(|e| MigrateError::write(&path, e))?;
        log::info!("Reformed {name} ({} rewrites)", report.rewrites);
        summary.rewritten.push(path);
    }

    Ok(summary)
}
