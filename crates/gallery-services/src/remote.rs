//! Remote provider: object storage for photos, a hosted model for captions.
//!
//! The description is stored as user metadata on the photo object itself, so there
//! is no separate index to keep in sync.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use gallery_core::constants::DESCRIPTION_METADATA_KEY;
use gallery_core::{AppError, GeneratedDescription, Photo, ProviderMode, UploadPhotoRequest};
use gallery_storage::keys::{filename_from_key, generate_photo_key, listing_prefix};
use gallery_storage::Storage;

use crate::captioner::Captioner;
use crate::photo_service::{require_description, PhotoService};

pub struct RemotePhotoService {
    storage: Arc<dyn Storage>,
    captioner: Arc<dyn Captioner>,
    key_prefix: String,
    url_expiry: Duration,
}

impl RemotePhotoService {
    pub fn new(
        storage: Arc<dyn Storage>,
        captioner: Arc<dyn Captioner>,
        key_prefix: impl Into<String>,
        url_expiry: Duration,
    ) -> Self {
        Self {
            storage,
            captioner,
            key_prefix: key_prefix.into(),
            url_expiry,
        }
    }

    /// Stored description, or `None` when the metadata cannot be read
    async fn description_for(&self, key: &str) -> Option<String> {
        match self.storage.get_metadata(key).await {
            Ok(mut metadata) => metadata.remove(DESCRIPTION_METADATA_KEY),
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "Could not fetch photo description");
                None
            }
        }
    }
}

#[async_trait]
impl PhotoService for RemotePhotoService {
    async fn get_photos(&self) -> Result<Vec<Photo>, AppError> {
        let prefix = listing_prefix(&self.key_prefix);
        let objects = self.storage.list_objects(&prefix).await.map_err(|e| {
            tracing::error!(error = %e, prefix = %prefix, "Listing photos failed");
            AppError::Load(e.to_string())
        })?;

        let mut entries = Vec::with_capacity(objects.len());
        for object in objects {
            // Folder placeholder objects; path-normalising backends list `photos/` as `photos`
            if object.key == prefix
                || object.key == prefix.trim_end_matches('/')
                || object.key.ends_with('/')
            {
                continue;
            }

            let url = self
                .storage
                .get_presigned_url(&object.key, self.url_expiry)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, key = %object.key, "Signing photo url failed");
                    AppError::Load(e.to_string())
                })?;
            let description = self.description_for(&object.key).await;

            entries.push(Photo::new(
                object.key.clone(),
                url,
                description.as_deref(),
                filename_from_key(&object.key),
                object.last_modified,
            ));
        }

        entries.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(entries)
    }

    async fn upload_photo(&self, request: UploadPhotoRequest) -> Result<Photo, AppError> {
        let description = require_description(&request.description)?;
        let file = request.file;
        let now = Utc::now();
        let key = generate_photo_key(&self.key_prefix, now.timestamp_millis(), &file.name);

        let taken = self
            .storage
            .exists(&key)
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;
        if taken {
            tracing::warn!(key = %key, "Upload key already exists");
            return Err(AppError::Upload(format!("Key already exists: {}", key)));
        }

        let metadata = HashMap::from([(
            DESCRIPTION_METADATA_KEY.to_string(),
            description.clone(),
        )]);
        self.storage
            .put_object(&key, file.data.clone(), &file.content_type, &metadata)
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        let url = self
            .storage
            .get_presigned_url(&key, self.url_expiry)
            .await
            .map_err(|e| AppError::Upload(e.to_string()))?;

        tracing::info!(
            key = %key,
            backend = self.storage.backend_name(),
            size_bytes = file.size(),
            "Photo uploaded"
        );

        Ok(Photo::new(key, url, Some(&description), file.name, now))
    }

    async fn generate_description(
        &self,
        image_base64: &str,
    ) -> Result<GeneratedDescription, AppError> {
        let description = self.captioner.caption(image_base64).await.map_err(|e| {
            tracing::error!(error = %e, "Caption generation failed");
            AppError::Generation(e.to_string())
        })?;

        Ok(GeneratedDescription { description })
    }

    fn mode(&self) -> ProviderMode {
        ProviderMode::Remote
    }
}
