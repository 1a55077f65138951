//! Shared helpers for the mtmigrate integration tests

use std::path::Path;

use mockito::{Mock, Server};
use mtmigrate::MigrateConfig;
use mtmigrate::config::MigrateConfigBuilder;

/// Inner HTML of `<body>` in a serialized document
#[allow(dead_code)]
pub fn body_of(html: &str) -> &str {
    let start = html.find("<body>").map_or(0, |i| i + "<body>".len());
    let end = html.rfind("</body>").unwrap_or(html.len());
    &html[start..end]
}

/// Wrap a fragment the way the parser does, so it round-trips unchanged
#[allow(dead_code)]
pub fn wrap_body(fragment: &str) -> String {
    format!("<html><head></head><body>{fragment}</body></html>")
}

/// Config rooted at `work_dir` that talks to `server` for both the legacy
/// image host and the destination API, with no pause between documents
#[allow(dead_code)]
pub fn upload_builder(work_dir: &Path, server: &Server, token: Option<&str>) -> MigrateConfigBuilder {
    MigrateConfig::builder()
        .work_dir(work_dir)
        .notion_token(token.map(str::to_string))
        .notion_api_base(server.url())
        .legacy_media_pattern(r"/legacy/")
        .upload_interval(std::time::Duration::ZERO)
}

#[allow(dead_code)]
pub fn upload_config(work_dir: &Path, server: &Server, token: Option<&str>) -> MigrateConfig {
    upload_builder(work_dir, server, token).build().unwrap()
}

/// Legacy host serving an image
#[allow(dead_code)]
pub async fn image_mock(server: &mut Server, path: &str, body: &[u8]) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(body)
        .create_async()
        .await
}

/// `getUploadFileUrl` answering with a signed PUT on the same server
#[allow(dead_code)]
pub async fn upload_url_mock(server: &mut Server, name: &str, final_url: &str) -> Mock {
    let body = serde_json::json!({
        "url": final_url,
        "signedGetUrl": format!("{}/signed-get/{name}", server.url()),
        "signedPutUrl": format!("{}/signed-put/{name}", server.url()),
    });
    server
        .mock("POST", "/api/v3/getUploadFileUrl")
        .match_header("cookie", "token_v2=secret")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "bucket": "secure",
            "name": name,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

/// Signed PUT target accepting the file body
#[allow(dead_code)]
pub async fn signed_put_mock(server: &mut Server, name: &str) -> Mock {
    server
        .mock("PUT", format!("/signed-put/{name}").as_str())
        .with_status(200)
        .create_async()
        .await
}
