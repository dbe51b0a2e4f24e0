//! HTTP surface constants

use std::time::Duration;

/// Route prefix under which the local provider serves uploaded bytes
pub const MEDIA_PATH: &str = "/media";

pub const STYLESHEET_PATH: &str = "/assets/gallery.css";

/// Allowance on top of the upload limit for multipart framing and form fields.
/// The validator, not the transport, reports files just over the limit.
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Drafts untouched for this long are dropped when the next draft is created
pub const DRAFT_TTL: Duration = Duration::from_secs(60 * 60);

/// Upper bound on drafts held at once; the least recently touched goes first
pub const MAX_DRAFTS: usize = 100;
