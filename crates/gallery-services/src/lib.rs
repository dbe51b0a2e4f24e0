//! Gallery Services Library
//!
//! This crate provides the photo repository abstraction (`PhotoService`) and its two
//! providers: a local in-process simulation and a remote provider backed by object
//! storage and a hosted captioning model. `select_photo_service` picks one at startup.

#[cfg(feature = "remote")]
pub mod bedrock;
pub mod captioner;
pub mod local;
pub mod photo_service;
pub mod remote;
pub mod selector;

// Re-export commonly used types
#[cfg(feature = "remote")]
pub use bedrock::BedrockCaptioner;
pub use captioner::{CaptionError, Captioner};
pub use local::{LocalPhotoService, SimulatedLatency};
pub use photo_service::PhotoService;
pub use remote::RemotePhotoService;
pub use selector::{select_photo_service, SelectedProvider};
