//! Image captioning contract used by the remote provider.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("Model request failed: {0}")]
    Request(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Model returned no text")]
    EmptyCaption,
}

/// A model that turns an image into a short description
#[async_trait]
pub trait Captioner: Send + Sync {
    /// `image_base64` is the bare payload, without a data-URL prefix
    async fn caption(&self, image_base64: &str) -> Result<String, CaptionError>;
}
