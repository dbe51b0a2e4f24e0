use async_trait::async_trait;
use gallery_core::{AppError, GeneratedDescription, Photo, PhotoFile, ProviderMode, UploadPhotoRequest};

/// Photo repository contract shared by the local and remote providers
///
/// Failures surface as one of the three user-facing kinds: `AppError::Load`,
/// `AppError::Upload` or `AppError::Generation`. Nothing is retried.
#[async_trait]
pub trait PhotoService: Send + Sync {
    /// All photos, newest first
    async fn get_photos(&self) -> Result<Vec<Photo>, AppError>;

    /// Persist a photo and return it with a resolvable url
    async fn upload_photo(&self, request: UploadPhotoRequest) -> Result<Photo, AppError>;

    /// Caption an image given as a bare base64 payload
    async fn generate_description(
        &self,
        image_base64: &str,
    ) -> Result<GeneratedDescription, AppError>;

    /// Base64 payload of a file, without data-URL prefix
    fn file_to_base64(&self, file: &PhotoFile) -> Result<String, AppError> {
        file.to_base64()
    }

    /// Raw file behind a photo url, for providers that serve their own media
    async fn media(&self, _photo_id: &str) -> Result<Option<PhotoFile>, AppError> {
        Ok(None)
    }

    fn mode(&self) -> ProviderMode;
}

/// Trimmed description, or `InvalidInput` when nothing is left
pub(crate) fn require_description(description: &str) -> Result<String, AppError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(
            "Description must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
