//! Provider selection, done once at startup.

use std::sync::Arc;
use std::time::Duration;

use gallery_core::{AppError, Config, ProviderMode};

use crate::local::{LocalPhotoService, SimulatedLatency};
use crate::photo_service::PhotoService;

/// The provider chosen for the process lifetime
#[derive(Clone)]
pub struct SelectedProvider {
    pub service: Arc<dyn PhotoService>,
    pub mode: ProviderMode,
}

impl SelectedProvider {
    pub fn is_local(&self) -> bool {
        self.mode.is_local()
    }
}

/// Local provider with the latency the configuration asks for
pub fn local_provider(config: &Config, media_base_path: &str) -> SelectedProvider {
    let latency = if config.simulated_latency_enabled() {
        SimulatedLatency::standard()
    } else {
        SimulatedLatency::disabled()
    };

    SelectedProvider {
        service: Arc::new(LocalPhotoService::new(latency, media_base_path)),
        mode: ProviderMode::Local,
    }
}

/// Remote provider when every remote credential is present, local simulation otherwise
pub async fn select_photo_service(
    config: &Config,
    media_base_path: &str,
) -> Result<SelectedProvider, AppError> {
    match config.remote_credentials() {
        Some(credentials) => remote_provider(config, &credentials).await,
        None => {
            tracing::info!("Remote credentials not configured, using local photo provider");
            Ok(local_provider(config, media_base_path))
        }
    }
}

#[cfg(feature = "remote")]
async fn remote_provider(
    config: &Config,
    credentials: &gallery_core::RemoteCredentials,
) -> Result<SelectedProvider, AppError> {
    use crate::bedrock::BedrockCaptioner;
    use crate::remote::RemotePhotoService;

    let storage = gallery_storage::create_storage(credentials).map_err(|e| {
        AppError::Internal(format!("Failed to initialize photo storage: {}", e))
    })?;
    let captioner = BedrockCaptioner::from_credentials(
        credentials,
        config.bedrock_model_id(),
        config.bedrock_max_tokens(),
    )
    .await;

    tracing::info!(
        bucket = %credentials.bucket,
        region = %credentials.region,
        model_id = %config.bedrock_model_id(),
        "Using remote photo provider"
    );

    Ok(SelectedProvider {
        service: Arc::new(RemotePhotoService::new(
            storage,
            Arc::new(captioner),
            config.photo_key_prefix(),
            Duration::from_secs(config.signed_url_expiry_secs()),
        )),
        mode: ProviderMode::Remote,
    })
}

#[cfg(not(feature = "remote"))]
async fn remote_provider(
    _config: &Config,
    _credentials: &gallery_core::RemoteCredentials,
) -> Result<SelectedProvider, AppError> {
    Err(AppError::Internal(
        "Remote provider not available (remote feature not enabled)".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::GalleryConfig;

    #[tokio::test]
    async fn test_missing_credentials_select_local() {
        let mut config = GalleryConfig::default();
        config.aws.access_key_id = Some("AKIAEXAMPLE".to_string());
        config.aws.bucket = Some("gallery-photos".to_string());
        let config = Config::from(config);

        let selected = select_photo_service(&config, "/media").await.unwrap();
        assert!(selected.is_local());
        assert_eq!(selected.service.mode(), ProviderMode::Local);
    }

    #[cfg(feature = "remote")]
    #[tokio::test]
    async fn test_full_credentials_select_remote() {
        let mut config = GalleryConfig::default();
        config.aws.access_key_id = Some("AKIAEXAMPLE".to_string());
        config.aws.secret_access_key = Some("secret".to_string());
        config.aws.bucket = Some("gallery-photos".to_string());
        let config = Config::from(config);

        let selected = select_photo_service(&config, "/media").await.unwrap();
        assert_eq!(selected.mode, ProviderMode::Remote);
        assert!(!selected.is_local());
    }

    #[tokio::test]
    async fn test_local_provider_honours_latency_switch() {
        let mut config = GalleryConfig::default();
        config.simulated_latency_enabled = false;
        let selected = local_provider(&Config::from(config), "/media");

        let start = std::time::Instant::now();
        selected.service.get_photos().await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}
