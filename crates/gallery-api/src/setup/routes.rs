//! Route configuration and setup

use crate::api_doc;
use crate::constants::{MEDIA_PATH, MULTIPART_OVERHEAD_BYTES, STYLESHEET_PATH};
use crate::handlers;
use crate::middleware::{security_headers_middleware, SecurityHeadersConfig};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Json, Router,
};
use gallery_core::Config;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    let body_limit = config.max_upload_bytes() + MULTIPART_OVERHEAD_BYTES;

    // Plain-http S3-compatible endpoints need an explicit image source
    let image_origins = config
        .s3_endpoint()
        .filter(|endpoint| endpoint.starts_with("http://"))
        .map(|endpoint| vec![endpoint.to_string()])
        .unwrap_or_default();
    let security_headers_config = Arc::new(SecurityHeadersConfig::new(
        image_origins,
        config.is_production(),
    ));

    tracing::info!(body_limit_bytes = body_limit, "Request body limit configured");

    Router::new()
        .merge(page_routes())
        .merge(api_routes())
        .route(
            "/api/openapi.json",
            get(|| async { Json(api_doc::get_openapi_spec()) }),
        )
        .route("/health", get(handlers::health::health_check))
        .route(STYLESHEET_PATH, get(handlers::assets::stylesheet))
        .route(
            &format!("{}/{{photo_id}}", MEDIA_PATH),
            get(handlers::media::get_media),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            security_headers_config,
            security_headers_middleware,
        ))
        .with_state(state)
}

/// Gallery and upload pages
fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::gallery::gallery_page))
        .route("/upload", get(handlers::upload::start_upload))
        .route("/upload/{id}", get(handlers::upload::upload_page))
        .route("/upload/{id}/file", post(handlers::upload::select_file))
        .route("/upload/{id}/change", post(handlers::upload::change_image))
        .route(
            "/upload/{id}/describe",
            post(handlers::upload::generate_description),
        )
        .route("/upload/{id}/submit", post(handlers::upload::submit_upload))
}

/// JSON endpoints
fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/photos", get(handlers::photos::list_photos))
}
