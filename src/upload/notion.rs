//! Client for Notion's file upload endpoint
//!
//! Uploading is a two-step exchange: ask `getUploadFileUrl` for a signed
//! S3 location, then `PUT` the bytes there. The permanent `url` from the
//! first response is what pages should reference.

use std::path::Path;

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, COOKIE};
use serde::{Deserialize, Serialize};

use super::types::UploadError;
use crate::utils::mime;

const UPLOAD_FILE_URL_PATH: &str = "/api/v3/getUploadFileUrl";
const UPLOAD_BUCKET: &str = "secure";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadFileUrlRequest<'a> {
    bucket: &'a str,
    name: &'a str,
    content_type: &'a str,
}

/// Response of `getUploadFileUrl`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFileUrl {
    /// Permanent URL of the uploaded file
    pub url: String,
    pub signed_get_url: Option<String>,
    /// Pre-signed URL accepting the file body
    pub signed_put_url: String,
}

#[derive(Debug, Clone)]
pub struct NotionClient {
    client: Client,
    api_base: String,
    token: String,
}

impl NotionClient {
    /// `api_base` is the scheme and host, without a trailing slash.
    #[must_use]
    pub fn new(client: Client, api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            token: token.into(),
        }
    }

    /// Upload a local file and return the URL it is served from.
    pub async fn upload_file(&self, path: &Path) -> Result<String, UploadError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| UploadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content_type = mime::from_path(path);

        let target = self.request_upload_url(&name, content_type).await?;

        let response = self
            .client
            .put(&target.signed_put_url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(UploadError::Status {
                step: "signed upload",
                status: response.status(),
            });
        }

        log::debug!("Uploaded {} to {}", path.display(), target.url);
        Ok(target.url)
    }

    async fn request_upload_url(
        &self,
        name: &str,
        content_type: &str,
    ) -> Result<UploadFileUrl, UploadError> {
        let response = self
            .client
            .post(format!("{}{UPLOAD_FILE_URL_PATH}", self.api_base))
            .header(COOKIE, format!("token_v2={}", self.token))
            .json(&UploadFileUrlRequest {
                bucket: UPLOAD_BUCKET,
                name,
                content_type,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UploadError::Status {
                step: "getUploadFileUrl",
                status: response.status(),
            });
        }
        Ok(response.json::<UploadFileUrl>().await?)
    }
}
