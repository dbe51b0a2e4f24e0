use axum::{extract::State, Json};
use gallery_core::Photo;
use std::sync::Arc;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// List photos as JSON, newest first
#[utoipa::path(
    get,
    path = "/api/photos",
    tag = "photos",
    responses(
        (status = 200, description = "Photos in the gallery", body = Vec<Photo>),
        (status = 502, description = "Photos could not be loaded", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(mode = %state.mode, operation = "list_photos"))]
pub async fn list_photos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Photo>>, HttpAppError> {
    let photos = state.photos.get_photos().await?;
    Ok(Json(photos))
}
