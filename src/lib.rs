//! Movable Type to Notion blog migration
//!
//! The `extract` pass splits an export into a metadata table and one HTML
//! file per entry, then normalizes legacy markup in those files. The
//! `upload` pass moves images off the legacy host and writes the final
//! HTML for import.

pub mod batch;
pub mod config;
pub mod content_saver;
pub mod dom;
pub mod error;
pub mod export;
pub mod reform;
pub mod upload;
pub mod utils;

pub use batch::{ExtractSummary, ReformSummary, UploadSummary, run_extract, run_reform, run_upload};
pub use config::{LinkRewrite, MigrateConfig, Workspace};
pub use error::{MigrateError, Result};
pub use export::{Entry, parse_export};
pub use reform::{ReformReport, Reformer, ReviewNotice, reform_html};
