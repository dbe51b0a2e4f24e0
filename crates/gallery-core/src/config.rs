//! Configuration module
//!
//! Configuration is read once from the environment at startup. The presence of the
//! remote credentials (access key pair plus bucket) decides which photo provider runs.

use std::env;

use crate::constants::{
    DEFAULT_AWS_REGION, DEFAULT_BEDROCK_MAX_TOKENS, DEFAULT_BEDROCK_MODEL_ID,
    DEFAULT_PHOTO_KEY_PREFIX, DEFAULT_SERVER_PORT, MAX_UPLOAD_BYTES, SIGNED_URL_EXPIRY_SECS,
};
use crate::storage_types::ProviderMode;

/// Server settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
}

/// AWS settings; every credential is optional so the app can run offline
#[derive(Clone, Debug)]
pub struct AwsConfig {
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub bucket: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
}

/// Complete gallery configuration
#[derive(Clone, Debug)]
pub struct GalleryConfig {
    pub base: BaseConfig,
    pub aws: AwsConfig,
    pub photo_key_prefix: String,
    pub signed_url_expiry_secs: u64,
    pub bedrock_model_id: String,
    pub bedrock_max_tokens: u32,
    pub simulated_latency_enabled: bool,
    pub max_upload_bytes: usize,
}

/// Everything the remote provider needs, present only when fully configured.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteCredentials {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    pub endpoint: Option<String>,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<GalleryConfig>);

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            base: BaseConfig {
                server_port: DEFAULT_SERVER_PORT,
                environment: "development".to_string(),
            },
            aws: AwsConfig {
                region: DEFAULT_AWS_REGION.to_string(),
                access_key_id: None,
                secret_access_key: None,
                bucket: None,
                s3_endpoint: None,
            },
            photo_key_prefix: DEFAULT_PHOTO_KEY_PREFIX.to_string(),
            signed_url_expiry_secs: SIGNED_URL_EXPIRY_SECS,
            bedrock_model_id: DEFAULT_BEDROCK_MODEL_ID.to_string(),
            bedrock_max_tokens: DEFAULT_BEDROCK_MAX_TOKENS,
            simulated_latency_enabled: true,
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl From<GalleryConfig> for Config {
    fn from(config: GalleryConfig) -> Self {
        Config(Box::new(config))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl GalleryConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = GalleryConfig {
            base: BaseConfig {
                server_port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                    .parse()
                    .unwrap_or(DEFAULT_SERVER_PORT),
                environment: env::var("ENVIRONMENT")
                    .unwrap_or_else(|_| "development".to_string())
                    .to_lowercase(),
            },
            aws: AwsConfig {
                region: non_empty_var("AWS_REGION")
                    .unwrap_or_else(|| DEFAULT_AWS_REGION.to_string()),
                access_key_id: non_empty_var("AWS_ACCESS_KEY_ID"),
                secret_access_key: non_empty_var("AWS_SECRET_ACCESS_KEY"),
                bucket: non_empty_var("S3_BUCKET_NAME"),
                s3_endpoint: non_empty_var("S3_ENDPOINT"),
            },
            photo_key_prefix: non_empty_var("PHOTO_KEY_PREFIX")
                .map(|p| p.trim_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_PHOTO_KEY_PREFIX.to_string()),
            signed_url_expiry_secs: env::var("SIGNED_URL_EXPIRY_SECS")
                .unwrap_or_else(|_| SIGNED_URL_EXPIRY_SECS.to_string())
                .parse()
                .unwrap_or(SIGNED_URL_EXPIRY_SECS),
            bedrock_model_id: non_empty_var("BEDROCK_MODEL_ID")
                .unwrap_or_else(|| DEFAULT_BEDROCK_MODEL_ID.to_string()),
            bedrock_max_tokens: env::var("BEDROCK_MAX_TOKENS")
                .unwrap_or_else(|_| DEFAULT_BEDROCK_MAX_TOKENS.to_string())
                .parse()
                .unwrap_or(DEFAULT_BEDROCK_MAX_TOKENS),
            simulated_latency_enabled: env::var("SIMULATED_LATENCY_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }

        if self.signed_url_expiry_secs == 0 {
            return Err(anyhow::anyhow!(
                "SIGNED_URL_EXPIRY_SECS must be greater than 0"
            ));
        }

        if self.photo_key_prefix.is_empty() || self.photo_key_prefix.contains("..") {
            return Err(anyhow::anyhow!(
                "PHOTO_KEY_PREFIX must be a non-empty key segment"
            ));
        }

        Ok(())
    }

    /// All three of access key id, secret key and bucket must be present and non-empty.
    pub fn remote_credentials(&self) -> Option<RemoteCredentials> {
        let present = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        Some(RemoteCredentials {
            region: self.aws.region.clone(),
            access_key_id: present(&self.aws.access_key_id)?,
            secret_access_key: present(&self.aws.secret_access_key)?,
            bucket: present(&self.aws.bucket)?,
            endpoint: self.aws.s3_endpoint.clone(),
        })
    }
}

impl Config {
    fn as_gallery(&self) -> &GalleryConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = GalleryConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_gallery().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment();
        env.eq_ignore_ascii_case("production") || env.eq_ignore_ascii_case("prod")
    }

    pub fn server_port(&self) -> u16 {
        self.as_gallery().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_gallery().base.environment
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_gallery().aws.s3_endpoint.as_deref()
    }

    pub fn photo_key_prefix(&self) -> &str {
        &self.as_gallery().photo_key_prefix
    }

    pub fn signed_url_expiry_secs(&self) -> u64 {
        self.as_gallery().signed_url_expiry_secs
    }

    pub fn bedrock_model_id(&self) -> &str {
        &self.as_gallery().bedrock_model_id
    }

    pub fn bedrock_max_tokens(&self) -> u32 {
        self.as_gallery().bedrock_max_tokens
    }

    pub fn simulated_latency_enabled(&self) -> bool {
        self.as_gallery().simulated_latency_enabled
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.as_gallery().max_upload_bytes
    }

    pub fn remote_credentials(&self) -> Option<RemoteCredentials> {
        self.as_gallery().remote_credentials()
    }

    pub fn provider_mode(&self) -> ProviderMode {
        if self.remote_credentials().is_some() {
            ProviderMode::Remote
        } else {
            ProviderMode::Local
        }
    }
}
