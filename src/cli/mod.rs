//! Command-line interface for the `mtmigrate` binary

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use mtmigrate::batch::{run_extract, run_upload};
use mtmigrate::config::MigrateConfig;
use mtmigrate::upload::{ImageMigrationResult, ProgressReporter};
use mtmigrate::utils::{DEFAULT_LEGACY_MEDIA_PATTERN, DEFAULT_UPLOAD_INTERVAL};

/// Migrate a Movable Type blog export to Notion
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Working directory holding csv/, tmp/, html/, images/ and downloads/
    #[arg(long, global = true, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub work_dir: PathBuf,

    /// URL prefix to replace in anchor hrefs
    #[arg(long, global = true, env = "OLD_URL")]
    pub old_url: Option<String>,

    /// Replacement for --old-url
    #[arg(long, global = true, env = "NEW_URL")]
    pub new_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split an export into metadata and per-entry HTML, then reform the HTML
    Extract {
        /// Movable Type export file
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Move legacy images of the reformed HTML to Notion
    Upload {
        /// Notion `token_v2` cookie value
        #[arg(long, env = "NOTION_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Seconds to wait between documents
        #[arg(long, default_value_t = DEFAULT_UPLOAD_INTERVAL.as_secs())]
        interval_secs: u64,

        /// Pattern matching image sources on the legacy host
        #[arg(long, default_value = DEFAULT_LEGACY_MEDIA_PATTERN)]
        legacy_host: String,
    },
}

/// Progress bar over the documents of an upload pass
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|e| {
                    log::warn!("Progress template error: {e}, using default");
                    ProgressStyle::default_bar()
                }),
        );
        Self { bar }
    }
}

impl ProgressReporter for BarProgress {
    fn report_started(&self, total: usize) {
        self.bar.set_length(total as u64);
    }

    fn report_document_started(&self, name: &str) {
        self.bar.set_message(name.to_string());
    }

    fn report_document_finished(&self, name: &str, result: &ImageMigrationResult) {
        if result.has_failures() {
            self.bar.println(format!(
                "{name}: {} of {} images left on the legacy host",
                result.failures.len(),
                result.total()
            ));
        }
        self.bar.inc(1);
    }

    fn report_completed(&self) {
        self.bar.finish_with_message("done");
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let builder = MigrateConfig::builder()
        .work_dir(&cli.work_dir)
        .link_rewrite_opt(cli.old_url, cli.new_url);

    match cli.command {
        Commands::Extract { file } => {
            let config = builder.build()?;
            let summary = run_extract(&config, &file)
                .await
                .with_context(|| format!("extract from {} failed", file.display()))?;

            log::info!(
                "Extracted {} entries ({} reformed, {} flagged for review); metadata in {}",
                summary.entries,
                summary.reform.rewritten.len(),
                summary.reform.notices.len(),
                summary.metadata_path.display()
            );
        }
        Commands::Upload {
            token,
            interval_secs,
            legacy_host,
        } => {
            let config = builder
                .notion_token(token)
                .upload_interval(Duration::from_secs(interval_secs))
                .legacy_media_pattern(legacy_host)
                .build()?;

            let progress = BarProgress::new();
            let summary = run_upload(&config, &progress)
                .await
                .context("upload failed")?;

            log::info!(
                "Uploaded {} documents: {} images migrated, {} failed",
                summary.written.len(),
                summary.images.successes,
                summary.images.failures.len()
            );
            for failure in &summary.images.failures {
                log::warn!("{failure}");
            }
        }
    }

    Ok(())
}
