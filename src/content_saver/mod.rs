//! Writers for extract-pass output: the metadata table and raw entry HTML

mod html_saver;
mod meta_saver;

pub use html_saver::{save_entry_html, save_entry_html_files};
pub use meta_saver::{MetadataRow, save_metadata, write_metadata};
