//! Streaming image download into the scratch directory
//!
//! Bytes go straight from the response stream to disk, so the size limit
//! is enforced twice: once against `Content-Length` before reading, and
//! again while streaming for servers that omit or misreport it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;

use super::types::DownloadError;
use crate::utils::image_file_name;

#[derive(Debug, Clone)]
pub struct ImageDownloader {
    client: Client,
    timeout: Duration,
    max_size: usize,
}

impl ImageDownloader {
    #[must_use]
    pub fn new(client: Client, timeout: Duration, max_size: usize) -> Self {
        Self {
            client,
            timeout,
            max_size,
        }
    }

    /// Download `url` into `dir`, named after the URL's last path segment.
    ///
    /// A partially written file is removed before the error is returned.
    pub async fn download(&self, url: &str, dir: &Path) -> Result<PathBuf, DownloadError> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| DownloadError::Io {
                path: dir.to_path_buf(),
                source,
            })?;

        let path = dir.join(image_file_name(url));
        match self.download_to(url, &path).await {
            Ok(size) => {
                log::debug!("Downloaded {url} ({size} bytes) to {}", path.display());
                Ok(path)
            }
            Err(e) => {
                // Ignore the result: the file may never have been created
                let _ = tokio::fs::remove_file(&path).await;
                Err(e)
            }
        }
    }

    async fn download_to(&self, url: &str, path: &Path) -> Result<u64, DownloadError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .header(
                reqwest::header::ACCEPT,
                "image/avif,image/webp,image/apng,image/*,*/*;q=0.8",
            )
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DownloadError::Status(response.status()));
        }

        let expected = response.content_length().unwrap_or(0);
        if expected > self.max_size as u64 {
            return Err(DownloadError::TooLarge {
                size: expected,
                limit: self.max_size,
            });
        }

        let io_error = |source: std::io::Error| DownloadError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = tokio::fs::File::create(path).await.map_err(io_error)?;
        let mut stream = response.bytes_stream();
        let mut total: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            total += chunk.len() as u64;
            if total > self.max_size as u64 {
                return Err(DownloadError::TooLarge {
                    size: total,
                    limit: self.max_size,
                });
            }
            file.write_all(&chunk).await.map_err(io_error)?;
        }
        file.flush().await.map_err(io_error)?;

        Ok(total)
    }
}
