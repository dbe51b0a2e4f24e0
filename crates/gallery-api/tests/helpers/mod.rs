//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p gallery-api`.

#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;

use axum_test::TestServer;
use gallery_api::setup::routes;
use gallery_api::state::AppState;
use gallery_core::{Config, GalleryConfig, ProviderMode};
use gallery_services::{
    Captioner, LocalPhotoService, PhotoService, RemotePhotoService, SelectedProvider,
    SimulatedLatency,
};
use gallery_storage::Storage;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Test application: server plus the shared state behind it.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

fn build(provider: SelectedProvider) -> TestApp {
    let config = Config::from(GalleryConfig::default());
    let state = Arc::new(AppState::new(&config, provider));
    let router = routes::setup_routes(&config, state.clone());
    let server = TestServer::new(router).expect("test server");
    TestApp { server, state }
}

/// Local provider without artificial latency
pub fn setup_local_app() -> TestApp {
    build(SelectedProvider {
        service: Arc::new(LocalPhotoService::new(SimulatedLatency::disabled(), "/media")),
        mode: ProviderMode::Local,
    })
}

/// Any provider with an explicit mode
pub fn setup_app_with(service: Arc<dyn PhotoService>, mode: ProviderMode) -> TestApp {
    build(SelectedProvider { service, mode })
}

/// Remote provider over the given storage and captioner
pub fn setup_remote_app(storage: Arc<dyn Storage>, captioner: Arc<dyn Captioner>) -> TestApp {
    let service = RemotePhotoService::new(storage, captioner, "photos", Duration::from_secs(3600));
    build(SelectedProvider {
        service: Arc::new(service),
        mode: ProviderMode::Remote,
    })
}

/// Start a draft and return its page path (`/upload/{id}`)
pub async fn start_draft(client: &TestServer) -> String {
    let response = client.get("/upload").await;
    assert_eq!(response.status_code(), 303);
    location(&response)
}

pub fn location(response: &axum_test::TestResponse) -> String {
    response
        .header("location")
        .to_str()
        .expect("ascii location")
        .to_string()
}

/// Draft id from a `/upload/{id}` path
pub fn draft_id(draft_path: &str) -> Uuid {
    draft_path
        .trim_start_matches("/upload/")
        .parse()
        .expect("draft id in path")
}
