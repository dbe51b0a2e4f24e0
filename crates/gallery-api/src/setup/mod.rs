//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::constants::MEDIA_PATH;
use crate::state::AppState;
use anyhow::{Context, Result};
use gallery_core::Config;
use gallery_services::select_photo_service;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        mode = %config.provider_mode(),
        "Configuration loaded and validated successfully"
    );

    // The provider is chosen once and shared for the process lifetime
    let provider = select_photo_service(&config, MEDIA_PATH)
        .await
        .context("Failed to initialize photo provider")?;

    let state = Arc::new(AppState::new(&config, provider));
    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
