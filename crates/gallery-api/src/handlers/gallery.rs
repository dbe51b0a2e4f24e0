use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use std::sync::Arc;

use crate::error::log_error;
use crate::state::AppState;
use crate::views::{GalleryState, GalleryView};

/// Gallery page: fetch, then render `Ready` or `Error`
#[tracing::instrument(skip(state), fields(mode = %state.mode, operation = "gallery"))]
pub async fn gallery_page(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut view = GalleryView::loading(state.is_local_mode());

    let result = state.photos.get_photos().await;
    if let Err(ref e) = result {
        log_error(e);
    }
    view.resolve(result);

    let status = match view.state() {
        GalleryState::Error(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    (status, Html(view.render()))
}
