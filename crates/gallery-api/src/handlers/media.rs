use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use gallery_core::AppError;
use std::sync::Arc;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Raw bytes of a photo held by the local provider
#[tracing::instrument(skip(state), fields(photo_id = %photo_id))]
pub async fn get_media(
    State(state): State<Arc<AppState>>,
    Path(photo_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let file = state
        .photos
        .media(&photo_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Photo not found: {}", photo_id)))?;

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (header::CACHE_CONTROL, "private, max-age=3600".to_string()),
        ],
        file.data,
    ))
}
