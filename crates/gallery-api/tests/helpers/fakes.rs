//! Providers and captioners that fail or count calls

use async_trait::async_trait;
use gallery_core::{AppError, GeneratedDescription, Photo, ProviderMode, UploadPhotoRequest};
use gallery_services::{CaptionError, Captioner, PhotoService};
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct FixedCaptioner(pub &'static str);

#[async_trait]
impl Captioner for FixedCaptioner {
    async fn caption(&self, _image_base64: &str) -> Result<String, CaptionError> {
        Ok(self.0.to_string())
    }
}

/// Provider whose every call fails with the matching user-facing error
#[derive(Default)]
pub struct BrokenProvider {
    pub uploads: AtomicUsize,
}

impl BrokenProvider {
    pub fn upload_attempts(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PhotoService for BrokenProvider {
    async fn get_photos(&self) -> Result<Vec<Photo>, AppError> {
        Err(AppError::Load("bucket unreachable".to_string()))
    }

    async fn upload_photo(&self, _request: UploadPhotoRequest) -> Result<Photo, AppError> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Upload("access denied".to_string()))
    }

    async fn generate_description(
        &self,
        _image_base64: &str,
    ) -> Result<GeneratedDescription, AppError> {
        Err(AppError::Generation("model unavailable".to_string()))
    }

    fn mode(&self) -> ProviderMode {
        ProviderMode::Remote
    }
}
