use axum::{http::header, response::IntoResponse};

const GALLERY_CSS: &str = include_str!("../../assets/gallery.css");

pub async fn stylesheet() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        GALLERY_CSS,
    )
}
