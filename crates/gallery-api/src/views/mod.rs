//! Server-rendered pages. Each view is a plain state value plus a `render` method.

pub mod gallery;
pub mod grid;
pub mod html;
pub mod upload;

pub use gallery::{GalleryState, GalleryView, EMPTY_GALLERY_SUMMARY, GALLERY_DEV_NOTICE};
pub use grid::{grid_rows, layout_grid, GridSlot, GRID_COLUMNS};
pub use upload::{
    Activity, FileRejection, FileSource, Refusal, UploadState, UploadView, DROP_REJECTED_MESSAGE,
    SUBMIT_INCOMPLETE_MESSAGE, UPLOAD_DEV_NOTICE,
};
