//! Local simulation provider
//!
//! Photos live in process memory for the lifetime of the server and are shared by
//! every client. Artificial delays emulate network latency during offline development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use gallery_core::{AppError, GeneratedDescription, Photo, PhotoFile, ProviderMode, UploadPhotoRequest};
use rand::Rng;
use tokio::sync::RwLock;

use crate::photo_service::{require_description, PhotoService};

/// Stand-in captions; the input image is ignored.
const CANNED_DESCRIPTIONS: [&str; 5] = [
    "A fascinating image that captures a unique moment with excellent composition and vibrant colors.",
    "A photograph showing natural elements in harmony, with lighting that brings out the important details.",
    "An artistic composition that balances its visual elements, creating an appealing scene.",
    "An image that conveys a feeling of calm and beauty, with careful attention to detail.",
    "A photograph that captures the essence of the moment from an interesting perspective with well balanced colors.",
];

/// Delays applied by the local provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub list: Duration,
    pub upload: Duration,
    pub describe: Duration,
}

impl SimulatedLatency {
    pub fn standard() -> Self {
        Self {
            list: Duration::from_secs(1),
            upload: Duration::from_secs(2),
            describe: Duration::from_secs(3),
        }
    }

    pub fn disabled() -> Self {
        Self {
            list: Duration::ZERO,
            upload: Duration::ZERO,
            describe: Duration::ZERO,
        }
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self::standard()
    }
}

async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

pub struct LocalPhotoService {
    photos: RwLock<Vec<Photo>>,
    files: RwLock<HashMap<String, PhotoFile>>,
    latency: SimulatedLatency,
    media_base_path: String,
    last_id_millis: AtomicI64,
}

impl LocalPhotoService {
    /// `media_base_path` is the route prefix under which uploaded bytes are served
    pub fn new(latency: SimulatedLatency, media_base_path: impl Into<String>) -> Self {
        Self {
            photos: RwLock::new(Vec::new()),
            files: RwLock::new(HashMap::new()),
            latency,
            media_base_path: media_base_path.into().trim_end_matches('/').to_string(),
            last_id_millis: AtomicI64::new(0),
        }
    }

    /// `mock-<millis>`, bumped past the previous id when two uploads share a millisecond
    fn next_id(&self, now_millis: i64) -> String {
        let mut previous = self.last_id_millis.load(Ordering::Relaxed);
        loop {
            let candidate = now_millis.max(previous + 1);
            match self.last_id_millis.compare_exchange(
                previous,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return format!("mock-{}", candidate),
                Err(actual) => previous = actual,
            }
        }
    }
}

#[async_trait]
impl PhotoService for LocalPhotoService {
    async fn get_photos(&self) -> Result<Vec<Photo>, AppError> {
        simulate(self.latency.list).await;
        Ok(self.photos.read().await.clone())
    }

    async fn upload_photo(&self, request: UploadPhotoRequest) -> Result<Photo, AppError> {
        let description = require_description(&request.description)?;
        simulate(self.latency.upload).await;

        let now = Utc::now();
        let id = self.next_id(now.timestamp_millis());
        let url = format!("{}/{}", self.media_base_path, id);
        let photo = Photo::new(
            id.clone(),
            url,
            Some(&description),
            request.file.name.clone(),
            now,
        );

        self.files.write().await.insert(id.clone(), request.file);
        self.photos.write().await.insert(0, photo.clone());

        tracing::info!(
            photo_id = %id,
            filename = %photo.filename,
            "Photo stored locally"
        );

        Ok(photo)
    }

    async fn generate_description(
        &self,
        _image_base64: &str,
    ) -> Result<GeneratedDescription, AppError> {
        simulate(self.latency.describe).await;
        let index = rand::rng().random_range(0..CANNED_DESCRIPTIONS.len());
        Ok(GeneratedDescription {
            description: CANNED_DESCRIPTIONS[index].to_string(),
        })
    }

    async fn media(&self, photo_id: &str) -> Result<Option<PhotoFile>, AppError> {
        Ok(self.files.read().await.get(photo_id).cloned())
    }

    fn mode(&self) -> ProviderMode {
        ProviderMode::Local
    }
}
