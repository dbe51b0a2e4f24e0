//! Gallery-wide constants shared by the providers and the views.

/// Largest accepted upload (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Shown when a photo has no stored description.
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// Object key prefix under which photos are stored.
pub const DEFAULT_PHOTO_KEY_PREFIX: &str = "photos";

/// Lifetime of signed read URLs handed to the gallery.
pub const SIGNED_URL_EXPIRY_SECS: u64 = 3600;

/// Object metadata key holding the photo description.
pub const DESCRIPTION_METADATA_KEY: &str = "description";

pub const DEFAULT_BEDROCK_MODEL_ID: &str = "anthropic.claude-3-sonnet-20240229-v1:0";
pub const DEFAULT_BEDROCK_MAX_TOKENS: u32 = 300;
pub const BEDROCK_ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Media type declared for every captioning request.
pub const CAPTION_MEDIA_TYPE: &str = "image/jpeg";

/// Instruction sent alongside the image to the captioning model.
pub const CAPTION_INSTRUCTION: &str = "Describe this image concisely and descriptively. \
Mention the main elements, colors, atmosphere and any relevant detail.";

pub const DEFAULT_AWS_REGION: &str = "us-east-1";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
