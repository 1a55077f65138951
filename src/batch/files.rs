use std::path::{Path, PathBuf};

use crate::error::{MigrateError, Result};

/// `*.html` files directly inside `dir`, sorted by file name.
pub fn list_html_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let list_error = |source: std::io::Error| MigrateError::ListDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "html") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// File name of `path` for logs and review notices.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
