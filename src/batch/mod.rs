//! Batch drivers for the extract and upload commands
//!
//! Each pass walks a working directory one document at a time: read,
//! parse, rewrite, serialize, write, and only then move on. Any I/O error
//! on a document aborts the run.

mod extract;
mod files;
mod reform_pass;
mod upload_pass;

pub use extract::{ExtractSummary, run_extract};
pub use files::list_html_files;
pub use reform_pass::{ReformSummary, run_reform};
pub use upload_pass::{UploadSummary, run_upload};
