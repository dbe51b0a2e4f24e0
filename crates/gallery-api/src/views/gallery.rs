//! Gallery page
//!
//! `Loading` is entered on every visit; the handler resolves it to `Ready` or `Error`
//! before rendering. Retry is a fresh visit, so `Error` links back to `/`.

use std::fmt::Write;

use gallery_core::{AppError, ErrorMetadata, Photo};

use super::grid::{layout_grid, GridSlot};
use super::html::{dev_notice, escape, page};

pub const GALLERY_DEV_NOTICE: &str = "Development mode - using sample data";
pub const EMPTY_GALLERY_SUMMARY: &str = "Your gallery is empty. Start by adding your first photo!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryState {
    Loading,
    Ready(Vec<Photo>),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct GalleryView {
    state: GalleryState,
    offline: bool,
}

impl GalleryView {
    pub fn loading(offline: bool) -> Self {
        Self {
            state: GalleryState::Loading,
            offline,
        }
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    /// Leave `Loading` with the outcome of the fetch
    pub fn resolve(&mut self, result: Result<Vec<Photo>, AppError>) {
        if self.state != GalleryState::Loading {
            return;
        }
        self.state = match result {
            Ok(photos) => GalleryState::Ready(photos),
            Err(e) => GalleryState::Error(e.client_message()),
        };
    }

    pub fn render(&self) -> String {
        let body = match &self.state {
            GalleryState::Loading => {
                "<main class=\"gallery-container\"><div class=\"loading\">Loading photos...</div></main>"
                    .to_string()
            }
            GalleryState::Error(message) => format!(
                "<main class=\"gallery-container\"><div class=\"error\"><p>{}</p>\
<a class=\"retry-button\" href=\"/\">Try again</a></div></main>",
                escape(message)
            ),
            GalleryState::Ready(photos) => self.render_ready(photos),
        };
        page("My Photo Gallery", &body)
    }

    fn render_ready(&self, photos: &[Photo]) -> String {
        let mut html = String::new();
        html.push_str("<main class=\"gallery-container\">\n<header class=\"gallery-header\">\n");
        html.push_str("<h1>My Photo Gallery</h1>\n");
        let _ = writeln!(html, "<p class=\"summary\">{}</p>", escape(&summary(photos.len())));
        if self.offline {
            html.push_str(&dev_notice(GALLERY_DEV_NOTICE));
            html.push('\n');
        }
        html.push_str("</header>\n<div class=\"gallery-grid\">\n");

        for row in layout_grid(photos) {
            html.push_str("<div class=\"gallery-row\">");
            for slot in row {
                html.push_str(&render_slot(slot));
            }
            html.push_str("</div>\n");
        }

        html.push_str("</div>\n</main>");
        html
    }
}

fn render_slot(slot: GridSlot<'_>) -> String {
    match slot {
        GridSlot::AddPhoto => "<div class=\"gallery-cell add-button-cell\">\
<a href=\"/upload\" class=\"add-button\"><span class=\"plus-icon\">+</span>\
<span class=\"add-text\">Add Photo</span></a></div>"
            .to_string(),
        GridSlot::Photo(photo) => format!(
            "<div class=\"gallery-cell photo-cell\"><img src=\"{url}\" alt=\"{desc}\" class=\"gallery-photo\">\
<div class=\"photo-overlay\"><p class=\"photo-description\">{desc}</p></div></div>",
            url = escape(&photo.url),
            desc = escape(&photo.description),
        ),
        GridSlot::Empty => "<div class=\"gallery-cell empty-cell\"></div>".to_string(),
    }
}

/// Pluralised count line under the title
pub fn summary(count: usize) -> String {
    match count {
        0 => EMPTY_GALLERY_SUMMARY.to_string(),
        1 => "You have 1 photo in your gallery".to_string(),
        n => format!("You have {} photos in your gallery", n),
    }
}
