//! Upload flow over HTTP: draft creation, file selection, description, submit.
//!
//! Run with: `cargo test -p gallery-api --test upload_test`

mod helpers;

use gallery_api::constants::MAX_DRAFTS;
use gallery_api::views::{
    Activity, DROP_REJECTED_MESSAGE, SUBMIT_INCOMPLETE_MESSAGE, UPLOAD_DEV_NOTICE,
};
use gallery_core::constants::MAX_UPLOAD_BYTES;
use gallery_core::ProviderMode;
use gallery_services::{LocalPhotoService, SimulatedLatency};
use gallery_storage::MemoryStorage;
use helpers::fakes::{BrokenProvider, FixedCaptioner};
use helpers::fixtures::{file_form, jpeg_form};
use helpers::{
    draft_id, location, setup_app_with, setup_local_app, setup_remote_app, start_draft, TestApp,
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_new_draft_offers_picker_and_drop_zone() {
    let app = setup_local_app();
    let client = app.client();
    let draft = start_draft(client).await;
    assert!(draft.starts_with("/upload/"));

    let html = client.get(&draft).await.text();
    assert!(html.contains(&format!("{}/file?source=picker", draft)));
    assert!(html.contains(&format!("{}/file?source=drop", draft)));
    assert!(html.contains(UPLOAD_DEV_NOTICE));
    assert!(html.contains("Back to Gallery"));
    assert_eq!(app.state.drafts.len().await, 1);
}

#[tokio::test]
async fn test_unknown_draft_starts_over() {
    let app = setup_local_app();
    let response = app
        .client()
        .get("/upload/00000000-0000-0000-0000-000000000000")
        .await;
    response.assert_status_see_other();
    assert_eq!(location(&response), "/upload");
}

#[tokio::test]
async fn test_selected_file_shows_name_and_size() {
    let app = setup_local_app();
    let client = app.client();
    let draft = start_draft(client).await;

    let response = client
        .post(&format!("{}/file", draft))
        .multipart(jpeg_form("sunset.jpg", 2 * 1024 * 1024))
        .await;
    response.assert_status_see_other();
    assert_eq!(location(&response), draft);

    let html = client.get(&draft).await.text();
    assert!(html.contains("sunset.jpg"));
    assert!(html.contains("2.00 MB"));
    assert!(html.contains("src=\"data:image/jpeg;base64,"));
    assert!(html.contains("Upload Photo"));
}

#[tokio::test]
async fn test_picker_rejects_non_image() {
    let app = setup_local_app();
    let client = app.client();
    let draft = start_draft(client).await;

    client
        .post(&format!("{}/file", draft))
        .add_query_param("source", "picker")
        .multipart(file_form("notes.pdf", "application/pdf", vec![1, 2, 3]))
        .await
        .assert_status_see_other();

    let html = client.get(&draft).await.text();
    assert!(html.contains("Please select a valid image file"));
    assert!(!html.contains("notes.pdf"));
}

#[tokio::test]
async fn test_picker_rejects_oversized_image() {
    let app = setup_local_app();
    let client = app.client();
    let draft = start_draft(client).await;

    client
        .post(&format!("{}/file", draft))
        .multipart(jpeg_form("huge.jpg", MAX_UPLOAD_BYTES + 1))
        .await
        .assert_status_see_other();

    let html = client.get(&draft).await.text();
    assert!(html.contains("The file is too large. Maximum 10MB"));
    assert!(!html.contains("huge.jpg"));
}

#[tokio::test]
async fn test_drop_rejections_share_one_message() {
    let app = setup_local_app();
    let client = app.client();
    let draft = start_draft(client).await;

    for form in [
        file_form("notes.txt", "text/plain", b"hello".to_vec()),
        jpeg_form("huge.jpg", MAX_UPLOAD_BYTES + 1),
    ] {
        client
            .post(&format!("{}/file", draft))
            .add_query_param("source", "drop")
            .multipart(form)
            .await
            .assert_status_see_other();

        let html = client.get(&draft).await.text();
        assert!(html.contains(DROP_REJECTED_MESSAGE));
    }
}

#[tokio::test]
async fn test_dropped_image_is_selected() {
    let app = setup_local_app();
    let client = app.client();
    let draft = start_draft(client).await;

    client
        .post(&format!("{}/file", draft))
        .add_query_param("source", "drop")
        .multipart(file_form("beach.png", "image/png", vec![0x89, b'P', b'N', b'G']))
        .await;

    let html = client.get(&draft).await.text();
    assert!(html.contains("beach.png"));
    assert!(!html.contains(DROP_REJECTED_MESSAGE));
}

#[tokio::test]
async fn test_blank_description_is_refused_without_upload() {
    let provider = Arc::new(BrokenProvider::default());
    let app = setup_app_with(provider.clone(), ProviderMode::Remote);
    let client = app.client();
    let draft = start_draft(client).await;

    client
        .post(&format!("{}/file", draft))
        .multipart(jpeg_form("a.jpg", 16))
        .await;
    let response = client
        .post(&format!("{}/submit", draft))
        .form(&[("description", "   ")])
        .await;
    assert_eq!(location(&response), draft);

    let html = client.get(&draft).await.text();
    assert!(html.contains(SUBMIT_INCOMPLETE_MESSAGE));
    assert_eq!(provider.upload_attempts(), 0);
}

#[tokio::test]
async fn test_submit_without_file_is_refused() {
    let app = setup_local_app();
    let client = app.client();
    let draft = start_draft(client).await;

    let response = client
        .post(&format!("{}/submit", draft))
        .form(&[("description", "sunset")])
        .await;
    assert_eq!(location(&response), draft);

    let html = client.get(&draft).await.text();
    assert!(html.contains(SUBMIT_INCOMPLETE_MESSAGE));
    assert!(client.get("/").await.text().contains("Your gallery is empty"));
}

#[tokio::test]
async fn test_failed_upload_keeps_draft_fields() {
    let provider = Arc::new(BrokenProvider::default());
    let app = setup_app_with(provider.clone(), ProviderMode::Remote);
    let client = app.client();
    let draft = start_draft(client).await;

    client
        .post(&format!("{}/file", draft))
        .multipart(jpeg_form("sunset.jpg", 16))
        .await;
    let response = client
        .post(&format!("{}/submit", draft))
        .form(&[("description", "sunset at the pier")])
        .await;
    assert_eq!(location(&response), draft);
    assert_eq!(provider.upload_attempts(), 1);

    let html = client.get(&draft).await.text();
    assert!(html.contains("Could not upload the photo"));
    assert!(html.contains("sunset.jpg"));
    assert!(html.contains(">sunset at the pier</textarea>"));
    assert!(!html.contains("access denied"));
}

#[tokio::test]
async fn test_generate_fills_description() {
    let app = setup_remote_app(
        Arc::new(MemoryStorage::default()),
        Arc::new(FixedCaptioner("Two boats in a harbour")),
    );
    let client = app.client();
    let draft = start_draft(client).await;

    client
        .post(&format!("{}/file", draft))
        .multipart(jpeg_form("boats.jpg", 64))
        .await;
    let response = client
        .post(&format!("{}/describe", draft))
        .form(&[("description", "my draft")])
        .await;
    assert_eq!(location(&response), draft);

    let html = client.get(&draft).await.text();
    assert!(html.contains(">Two boats in a harbour</textarea>"));
    assert!(!html.contains(UPLOAD_DEV_NOTICE));
}

#[tokio::test]
async fn test_generation_failure_keeps_typed_description() {
    let app = setup_app_with(Arc::new(BrokenProvider::default()), ProviderMode::Remote);
    let client = app.client();
    let draft = start_draft(client).await;

    client
        .post(&format!("{}/file", draft))
        .multipart(jpeg_form("boats.jpg", 64))
        .await;
    client
        .post(&format!("{}/describe", draft))
        .form(&[("description", "my draft")])
        .await;

    let html = client.get(&draft).await.text();
    assert!(html.contains("Could not generate the automatic description"));
    assert!(html.contains(">my draft</textarea>"));
}

#[tokio::test]
async fn test_change_image_resets_draft() {
    let app = setup_local_app();
    let client = app.client();
    let draft = start_draft(client).await;

    client
        .post(&format!("{}/file", draft))
        .multipart(jpeg_form("sunset.jpg", 16))
        .await;
    client
        .post(&format!("{}/change", draft))
        .await
        .assert_status_see_other();

    let html = client.get(&draft).await.text();
    assert!(!html.contains("sunset.jpg"));
    assert!(html.contains("source=picker"));
}

#[tokio::test]
async fn test_successful_submit_discards_draft() {
    let app = setup_local_app();
    let client = app.client();
    let draft = start_draft(client).await;

    client
        .post(&format!("{}/file", draft))
        .multipart(jpeg_form("sunset.jpg", 16))
        .await;
    client
        .post(&format!("{}/submit", draft))
        .form(&[("description", "sunset")])
        .await
        .assert_status_see_other();

    assert!(app.state.drafts.is_empty().await);
    let response = client.get(&draft).await;
    assert_eq!(location(&response), "/upload");
}

/// Local provider whose describe and upload calls take long enough to be abandoned
fn setup_slow_local_app() -> TestApp {
    let latency = SimulatedLatency {
        list: Duration::ZERO,
        upload: Duration::from_millis(400),
        describe: Duration::from_millis(400),
    };
    setup_app_with(
        Arc::new(LocalPhotoService::new(latency, "/media")),
        ProviderMode::Local,
    )
}

/// Poll until the draft leaves its in-flight activity (or disappears)
async fn wait_until_settled(app: &TestApp, draft: &str) {
    let id = draft_id(draft);
    for _ in 0..100 {
        match app.state.drafts.get(&id).await {
            Some(view) if view.is_busy() => tokio::time::sleep(Duration::from_millis(20)).await,
            _ => return,
        }
    }
    panic!("draft {} still busy", draft);
}

#[tokio::test]
async fn test_abandoned_generation_still_settles_the_draft() {
    let app = setup_slow_local_app();
    let client = app.client();
    let draft = start_draft(client).await;
    client
        .post(&format!("{}/file", draft))
        .multipart(jpeg_form("boats.jpg", 64))
        .await;

    let request = client
        .post(&format!("{}/describe", draft))
        .form(&[("description", "typed")]);
    let abandoned = tokio::time::timeout(Duration::from_millis(50), request).await;
    assert!(abandoned.is_err());

    let id = draft_id(&draft);
    let in_flight = app.state.drafts.get(&id).await.unwrap();
    assert_eq!(in_flight.activity(), Some(Activity::Generating));

    wait_until_settled(&app, &draft).await;
    let view = app.state.drafts.get(&id).await.unwrap();
    assert_eq!(view.activity(), Some(Activity::Idle));
    assert_ne!(view.selected().unwrap().description, "typed");

    // The draft accepts new actions again
    client.post(&format!("{}/change", draft)).await;
    let html = client.get(&draft).await.text();
    assert!(!html.contains("boats.jpg"));
    assert!(html.contains("source=picker"));
}

#[tokio::test]
async fn test_abandoned_submit_still_completes_the_upload() {
    let app = setup_slow_local_app();
    let client = app.client();
    let draft = start_draft(client).await;
    client
        .post(&format!("{}/file", draft))
        .multipart(jpeg_form("pier.jpg", 64))
        .await;

    let request = client
        .post(&format!("{}/submit", draft))
        .form(&[("description", "pier at dusk")]);
    let abandoned = tokio::time::timeout(Duration::from_millis(50), request).await;
    assert!(abandoned.is_err());

    wait_until_settled(&app, &draft).await;
    assert!(app.state.drafts.get(&draft_id(&draft)).await.is_none());

    let html = client.get("/").await.text();
    assert!(html.contains("alt=\"pier at dusk\""));
}

#[tokio::test]
async fn test_repeated_visits_keep_draft_count_bounded() {
    let app = setup_local_app();
    let client = app.client();

    let mut last = String::new();
    for _ in 0..(MAX_DRAFTS + 50) {
        last = start_draft(client).await;
    }

    assert_eq!(app.state.drafts.len().await, MAX_DRAFTS);
    client.get(&last).await.assert_status_ok();
}
