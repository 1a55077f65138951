use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{MigrateError, Result};
use crate::export::Entry;
use crate::utils::METADATA_DATE_FORMAT;

/// One row of the metadata table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Slug")]
    pub slug: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "Excerpt")]
    pub excerpt: String,
}

impl From<&Entry> for MetadataRow {
    fn from(entry: &Entry) -> Self {
        Self {
            title: entry.title.clone(),
            slug: entry.slug(),
            status: entry.status.clone(),
            date: entry
                .date
                .map(|date| date.format(METADATA_DATE_FORMAT).to_string())
                .unwrap_or_default(),
            author: entry.author.clone(),
            tags: entry.categories.join(", "),
            excerpt: entry.excerpt.clone(),
        }
    }
}

/// Write the header and one row per entry to `writer`.
///
/// The header is written even when `entries` is empty.
pub fn write_metadata<W: Write>(writer: W, entries: &[Entry]) -> Result<()> {
    let mut csv = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(["Title", "Slug", "Status", "Date", "Author", "Tags", "Excerpt"])?;
    for entry in entries {
        csv.serialize(MetadataRow::from(entry))?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Create (or truncate) the metadata file at `path` and fill it.
pub fn save_metadata(path: &Path, entries: &[Entry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| MigrateError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let file = std::fs::File::create(path).map_err(|e| MigrateError::write(path, e))?;
    write_metadata(file, entries)?;
    log::info!("Wrote metadata for {} entries to {}", entries.len(), path.display());
    Ok(())
}
