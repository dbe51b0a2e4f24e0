//! Gallery Core Library
//!
//! This crate provides the domain models, error types, configuration and upload
//! validation shared by every gallery crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{AwsConfig, BaseConfig, Config, GalleryConfig, RemoteCredentials};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{GeneratedDescription, Photo, PhotoFile, UploadPhotoRequest};
pub use storage_types::ProviderMode;
pub use validation::{ImageValidator, ValidationError};
