//! Gallery page, JSON listing and media serving.
//!
//! Run with: `cargo test -p gallery-api --test gallery_test`

mod helpers;

use gallery_api::views::{EMPTY_GALLERY_SUMMARY, GALLERY_DEV_NOTICE};
use gallery_core::ProviderMode;
use gallery_storage::MemoryStorage;
use helpers::fakes::{BrokenProvider, FixedCaptioner};
use helpers::fixtures::jpeg_form;
use helpers::{location, setup_app_with, setup_local_app, setup_remote_app, start_draft};
use serde_json::Value;
use std::sync::Arc;

#[tokio::test]
async fn test_empty_gallery_shows_only_add_cell() {
    let app = setup_local_app();

    let response = app.client().get("/").await;
    response.assert_status_ok();
    let html = response.text();

    assert!(html.contains(EMPTY_GALLERY_SUMMARY));
    assert!(html.contains(GALLERY_DEV_NOTICE));
    assert_eq!(html.matches("class=\"gallery-row\"").count(), 1);
    assert_eq!(html.matches("add-button-cell").count(), 1);
    assert_eq!(html.matches("empty-cell").count(), 3);
    assert!(html.contains("href=\"/upload\""));
}

#[tokio::test]
async fn test_uploaded_photo_appears_in_gallery_and_api() {
    let app = setup_local_app();
    let client = app.client();
    let draft = start_draft(client).await;

    client
        .post(&format!("{}/file", draft))
        .multipart(jpeg_form("sunset.jpg", 2 * 1024 * 1024))
        .await
        .assert_status_see_other();
    let response = client
        .post(&format!("{}/submit", draft))
        .form(&[("description", "sunset")])
        .await;
    response.assert_status_see_other();
    assert_eq!(location(&response), "/");

    let html = client.get("/").await.text();
    assert!(html.contains("You have 1 photo in your gallery"));
    assert!(html.contains("alt=\"sunset\""));
    assert!(!html.contains(EMPTY_GALLERY_SUMMARY));

    let photos: Value = client.get("/api/photos").await.json();
    let photos = photos.as_array().expect("array of photos");
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0]["description"], "sunset");
    assert_eq!(photos[0]["filename"], "sunset.jpg");
    assert!(photos[0]["id"].as_str().unwrap().starts_with("mock-"));
    assert!(photos[0]["uploadedAt"].is_string());
}

#[tokio::test]
async fn test_four_photos_wrap_to_second_row() {
    let app = setup_local_app();
    let client = app.client();

    for i in 0..4 {
        let draft = start_draft(client).await;
        client
            .post(&format!("{}/file", draft))
            .multipart(jpeg_form(&format!("p{}.jpg", i), 16))
            .await;
        client
            .post(&format!("{}/submit", draft))
            .form(&[("description", format!("photo {}", i))])
            .await
            .assert_status_see_other();
    }

    let html = client.get("/").await.text();
    assert!(html.contains("You have 4 photos in your gallery"));
    assert_eq!(html.matches("class=\"gallery-row\"").count(), 2);
    assert_eq!(html.matches("photo-cell").count(), 4);
    assert_eq!(html.matches("empty-cell").count(), 3);

    // Newest first
    let newest = html.find("photo 3").unwrap();
    let oldest = html.find("photo 0").unwrap();
    assert!(newest < oldest);
}

#[tokio::test]
async fn test_load_failure_renders_retry() {
    let app = setup_app_with(Arc::new(BrokenProvider::default()), ProviderMode::Remote);

    let response = app.client().get("/").await;
    assert_eq!(response.status_code(), 502);
    let html = response.text();
    assert!(html.contains("Could not load the photos"));
    assert!(html.contains("class=\"retry-button\" href=\"/\""));
    assert!(!html.contains("bucket unreachable"));
    assert!(!html.contains(GALLERY_DEV_NOTICE));
}

#[tokio::test]
async fn test_api_listing_failure_is_json_error() {
    let app = setup_app_with(Arc::new(BrokenProvider::default()), ProviderMode::Remote);

    let response = app.client().get("/api/photos").await;
    assert_eq!(response.status_code(), 502);
    let body: Value = response.json();
    assert_eq!(body["code"], "LOAD_ERROR");
    assert_eq!(body["recoverable"], true);
}

#[tokio::test]
async fn test_remote_gallery_has_no_dev_notice() {
    let app = setup_remote_app(
        Arc::new(MemoryStorage::default()),
        Arc::new(FixedCaptioner("unused")),
    );

    let html = app.client().get("/").await.text();
    assert!(html.contains(EMPTY_GALLERY_SUMMARY));
    assert!(!html.contains(GALLERY_DEV_NOTICE));
}

#[tokio::test]
async fn test_media_serves_uploaded_bytes() {
    let app = setup_local_app();
    let client = app.client();
    let draft = start_draft(client).await;

    client
        .post(&format!("{}/file", draft))
        .multipart(jpeg_form("tiny.jpg", 32))
        .await;
    client
        .post(&format!("{}/submit", draft))
        .form(&[("description", "tiny")])
        .await;

    let photos: Value = client.get("/api/photos").await.json();
    let url = photos[0]["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/media/mock-"));

    let response = client.get(&url).await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/jpeg");
    assert_eq!(response.as_bytes().len(), 32);
}

#[tokio::test]
async fn test_unknown_media_is_not_found() {
    let app = setup_local_app();
    let response = app.client().get("/media/mock-0").await;
    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}
