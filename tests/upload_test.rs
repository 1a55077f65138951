mod common;

use std::fs;

use common::{image_mock, signed_put_mock, upload_builder, upload_config, upload_url_mock};
use mtmigrate::upload::{FailureStage, NoOpProgress};
use mtmigrate::{MigrateError, run_upload};

const NOTION_URL: &str = "https://s3-us-west-2.amazonaws.com/secure.notion-static.com/abc/photo.png";

fn write_raw(work_dir: &std::path::Path, name: &str, html: &str) {
    let raw = work_dir.join("tmp");
    fs::create_dir_all(&raw).unwrap();
    fs::write(raw.join(name), html).unwrap();
}

#[tokio::test]
async fn test_legacy_image_src_is_replaced() {
    let mut server = mockito::Server::new_async().await;
    let image = image_mock(&mut server, "/legacy/photo.png", b"\x89PNG fake").await;
    let request = upload_url_mock(&mut server, "photo.png", NOTION_URL).await;
    let put = signed_put_mock(&mut server, "photo.png").await;

    let work = tempfile::tempdir().unwrap();
    let legacy_src = format!("{}/legacy/photo.png", server.url());
    write_raw(
        work.path(),
        "post.html",
        &format!(
            r#"<p><img src="{legacy_src}" alt="photo"></p><img src="https://elsewhere.example/keep.png">"#
        ),
    );

    let config = upload_config(work.path(), &server, Some("secret"));
    let summary = run_upload(&config, &NoOpProgress).await.unwrap();

    image.assert_async().await;
    request.assert_async().await;
    put.assert_async().await;

    assert_eq!(summary.images.successes, 1);
    assert!(!summary.images.has_failures());

    let output = fs::read_to_string(work.path().join("html/post.html")).unwrap();
    assert!(output.contains(&format!(r#"<img src="{NOTION_URL}" alt="photo">"#)));
    assert!(output.contains(r#"<img src="https://elsewhere.example/keep.png">"#));

    // Uploaded image is archived, scratch copy is gone
    assert!(work.path().join("images/photo.png").is_file());
    assert!(!work.path().join("downloads/photo.png").exists());
}

#[tokio::test]
async fn test_download_failure_keeps_src_and_writes_document() {
    let mut server = mockito::Server::new_async().await;
    let _missing = server
        .mock("GET", "/legacy/gone.png")
        .with_status(404)
        .create_async()
        .await;
    let request = server
        .mock("POST", "/api/v3/getUploadFileUrl")
        .expect(0)
        .create_async()
        .await;

    let work = tempfile::tempdir().unwrap();
    let legacy_src = format!("{}/legacy/gone.png", server.url());
    write_raw(work.path(), "post.html", &format!(r#"<img src="{legacy_src}">"#));

    let config = upload_config(work.path(), &server, Some("secret"));
    let summary = run_upload(&config, &NoOpProgress).await.unwrap();

    request.assert_async().await;
    assert_eq!(summary.images.successes, 0);
    assert_eq!(summary.images.failures.len(), 1);
    assert_eq!(summary.images.failures[0].stage, FailureStage::Download);
    assert_eq!(summary.images.failures[0].url, legacy_src);

    let output = fs::read_to_string(work.path().join("html/post.html")).unwrap();
    assert!(output.contains(&format!(r#"<img src="{legacy_src}">"#)));
    assert!(!work.path().join("downloads/gone.png").exists());
}

#[tokio::test]
async fn test_upload_failure_keeps_src_and_continues() {
    let mut server = mockito::Server::new_async().await;
    let _first = image_mock(&mut server, "/legacy/first.png", b"one").await;
    let _second = image_mock(&mut server, "/legacy/second.png", b"two").await;
    let _rejected = server
        .mock("POST", "/api/v3/getUploadFileUrl")
        .match_body(mockito::Matcher::PartialJson(
            serde_json::json!({ "name": "first.png" }),
        ))
        .with_status(401)
        .create_async()
        .await;
    let _accepted = upload_url_mock(&mut server, "second.png", NOTION_URL).await;
    let _put = signed_put_mock(&mut server, "second.png").await;

    let work = tempfile::tempdir().unwrap();
    let first_src = format!("{}/legacy/first.png", server.url());
    let second_src = format!("{}/legacy/second.png", server.url());
    write_raw(
        work.path(),
        "post.html",
        &format!(r#"<img src="{first_src}"><img src="{second_src}">"#),
    );

    let config = upload_config(work.path(), &server, Some("secret"));
    let summary = run_upload(&config, &NoOpProgress).await.unwrap();

    assert_eq!(summary.images.successes, 1);
    assert_eq!(summary.images.failures.len(), 1);
    assert_eq!(summary.images.failures[0].stage, FailureStage::Upload);

    let output = fs::read_to_string(work.path().join("html/post.html")).unwrap();
    assert!(output.contains(&format!(r#"<img src="{first_src}">"#)));
    assert!(output.contains(&format!(r#"<img src="{NOTION_URL}">"#)));
    assert!(!work.path().join("downloads/first.png").exists());
}

#[tokio::test]
async fn test_oversized_image_is_a_download_failure() {
    let mut server = mockito::Server::new_async().await;
    let _big = image_mock(&mut server, "/legacy/big.png", &[0u8; 100]).await;
    let request = server
        .mock("POST", "/api/v3/getUploadFileUrl")
        .expect(0)
        .create_async()
        .await;

    let work = tempfile::tempdir().unwrap();
    let legacy_src = format!("{}/legacy/big.png", server.url());
    write_raw(work.path(), "post.html", &format!(r#"<img src="{legacy_src}">"#));

    let config = upload_builder(work.path(), &server, Some("secret"))
        .max_image_size(10)
        .build()
        .unwrap();
    let summary = run_upload(&config, &NoOpProgress).await.unwrap();

    request.assert_async().await;
    assert_eq!(summary.images.successes, 0);
    assert_eq!(summary.images.failures.len(), 1);
    assert_eq!(summary.images.failures[0].stage, FailureStage::Download);
    assert!(summary.images.failures[0].error.contains("size limit"));

    let output = fs::read_to_string(work.path().join("html/post.html")).unwrap();
    assert!(output.contains(&format!(r#"<img src="{legacy_src}">"#)));
    assert!(!work.path().join("downloads/big.png").exists());
}

#[tokio::test]
async fn test_rejected_signed_put_is_an_upload_failure() {
    let mut server = mockito::Server::new_async().await;
    let _image = image_mock(&mut server, "/legacy/photo.png", b"png").await;
    let _request = upload_url_mock(&mut server, "photo.png", NOTION_URL).await;
    let put = server
        .mock("PUT", "/signed-put/photo.png")
        .with_status(403)
        .create_async()
        .await;

    let work = tempfile::tempdir().unwrap();
    let legacy_src = format!("{}/legacy/photo.png", server.url());
    write_raw(work.path(), "post.html", &format!(r#"<img src="{legacy_src}">"#));

    let config = upload_config(work.path(), &server, Some("secret"));
    let summary = run_upload(&config, &NoOpProgress).await.unwrap();

    put.assert_async().await;
    assert_eq!(summary.images.successes, 0);
    assert_eq!(summary.images.failures.len(), 1);
    assert_eq!(summary.images.failures[0].stage, FailureStage::Upload);

    let output = fs::read_to_string(work.path().join("html/post.html")).unwrap();
    assert!(output.contains(&format!(r#"<img src="{legacy_src}">"#)));
    assert!(!output.contains(NOTION_URL));
    assert!(!work.path().join("downloads/photo.png").exists());
}

#[tokio::test]
async fn test_archive_failure_keeps_src() {
    let mut server = mockito::Server::new_async().await;
    let _image = image_mock(&mut server, "/legacy/photo.png", b"png").await;
    let _request = upload_url_mock(&mut server, "photo.png", NOTION_URL).await;
    let put = signed_put_mock(&mut server, "photo.png").await;

    let work = tempfile::tempdir().unwrap();
    // A plain file where the images directory should be
    fs::write(work.path().join("images"), "not a directory").unwrap();
    let legacy_src = format!("{}/legacy/photo.png", server.url());
    write_raw(work.path(), "post.html", &format!(r#"<img src="{legacy_src}">"#));

    let config = upload_config(work.path(), &server, Some("secret"));
    let summary = run_upload(&config, &NoOpProgress).await.unwrap();

    put.assert_async().await;
    assert_eq!(summary.images.successes, 0);
    assert_eq!(summary.images.failures.len(), 1);
    assert_eq!(summary.images.failures[0].stage, FailureStage::Archive);

    let output = fs::read_to_string(work.path().join("html/post.html")).unwrap();
    assert!(output.contains(&format!(r#"<img src="{legacy_src}">"#)));
    assert!(!work.path().join("downloads/photo.png").exists());
}

#[tokio::test]
async fn test_every_document_is_written_in_order() {
    let server = mockito::Server::new_async().await;
    let work = tempfile::tempdir().unwrap();
    write_raw(work.path(), "b.html", "<p>b</p>");
    write_raw(work.path(), "a.html", "<p>a</p>");

    let config = upload_config(work.path(), &server, Some("secret"));
    let summary = run_upload(&config, &NoOpProgress).await.unwrap();

    let names: Vec<_> = summary
        .written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.html", "b.html"]);
    assert_eq!(summary.images.total(), 0);
    assert_eq!(
        fs::read_to_string(work.path().join("html/a.html")).unwrap(),
        "<html><head></head><body><p>a</p></body></html>"
    );
}

#[tokio::test]
async fn test_missing_token_is_fatal() {
    let server = mockito::Server::new_async().await;
    let work = tempfile::tempdir().unwrap();
    write_raw(work.path(), "post.html", "<p>x</p>");

    let config = upload_config(work.path(), &server, None);
    let err = run_upload(&config, &NoOpProgress).await.unwrap_err();
    assert!(matches!(err, MigrateError::Config(_)));
    assert!(!work.path().join("html").exists());
}
