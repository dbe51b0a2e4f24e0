use base64::Engine;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::DEFAULT_DESCRIPTION;
use crate::error::AppError;

/// A stored photo as exposed to the gallery.
///
/// `id` is provider-assigned and opaque: an object key for the remote provider,
/// `mock-<millis>` for the local simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    /// Time-limited (remote) or process-lifetime (local) fetch location
    pub url: String,
    pub description: String,
    /// Original upload name
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Photo {
    pub fn new(
        id: impl Into<String>,
        url: impl Into<String>,
        description: Option<&str>,
        filename: impl Into<String>,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            description: description_or_default(description),
            filename: filename.into(),
            uploaded_at,
        }
    }
}

/// Falls back to the placeholder when the description is absent or blank.
pub fn description_or_default(description: Option<&str>) -> String {
    match description.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => DEFAULT_DESCRIPTION.to_string(),
    }
}

/// A file chosen by the user, held in memory until it is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl PhotoFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Size in MB with two decimals, as shown next to the preview
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size() as f64 / 1024.0 / 1024.0)
    }

    pub fn is_image(&self) -> bool {
        self.content_type.to_lowercase().starts_with("image/")
    }

    /// `data:<mime>;base64,<payload>` form used for previews
    pub fn to_data_url(&self) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(&self.data);
        format!("data:{};base64,{}", self.content_type, payload)
    }

    /// Base64 payload of the file without any data-URL prefix
    pub fn to_base64(&self) -> Result<String, AppError> {
        strip_data_url_prefix(&self.to_data_url())
    }
}

/// Returns the part of a data URL after the first comma.
pub fn strip_data_url_prefix(data_url: &str) -> Result<String, AppError> {
    match data_url.split_once(',') {
        Some((header, payload)) if header.starts_with("data:") => Ok(payload.to_string()),
        _ => Err(AppError::InvalidInput(
            "File could not be read as a data URL".to_string(),
        )),
    }
}

/// Input of an upload: the file plus its (already trimmed) description.
#[derive(Debug, Clone)]
pub struct UploadPhotoRequest {
    pub file: PhotoFile,
    pub description: String,
}

/// Output of the captioning model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GeneratedDescription {
    pub description: String,
}
