use std::path::{Path, PathBuf};

use crate::error::{MigrateError, Result};
use crate::export::Entry;
use crate::utils::entry_file_name;

/// Write one entry's body plus extended body into `dir`, named after its
/// title. Returns the path written.
pub async fn save_entry_html(entry: &Entry, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(entry_file_name(&entry.title, &entry.slug()));
    tokio::fs::write(&path, entry.full_body())
        .await
        .map_err(|e| MigrateError::write(&path, e))?;
    log::debug!("Saved entry '{}' to {}", entry.title, path.display());
    Ok(path)
}

/// Write every entry into `dir`, creating it first. Later entries with the
/// same file name overwrite earlier ones.
pub async fn save_entry_html_files(entries: &[Entry], dir: &Path) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| MigrateError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

    let mut written = Vec::with_capacity(entries.len());
    for entry in entries {
        written.push(save_entry_html(entry, dir).await?);
    }
    Ok(written)
}
