//! Data models for the gallery
//!
//! Photos are immutable once created; there is no update or delete path.

mod photo;

pub use photo::*;
