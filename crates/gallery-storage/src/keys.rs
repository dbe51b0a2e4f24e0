//! Shared key generation for photo objects.
//!
//! Key format: `{prefix}/{upload_millis}-{filename}`.

/// Build the storage key for an upload made at `uploaded_at_millis`.
///
/// Path separators inside the filename are replaced so every photo stays a direct
/// child of the prefix.
pub fn generate_photo_key(prefix: &str, uploaded_at_millis: i64, filename: &str) -> String {
    let safe_name: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!(
        "{}/{}-{}",
        prefix.trim_matches('/'),
        uploaded_at_millis,
        safe_name
    )
}

/// Listing prefix for a key prefix (always ends with `/`).
pub fn listing_prefix(prefix: &str) -> String {
    format!("{}/", prefix.trim_matches('/'))
}

/// Recover the original upload name from a photo key.
///
/// Keys that do not carry a `{millis}-` stamp yield their last path segment unchanged.
pub fn filename_from_key(key: &str) -> String {
    let last = key.rsplit('/').next().unwrap_or(key);
    match last.split_once('-') {
        Some((stamp, name))
            if !stamp.is_empty() && !name.is_empty() && stamp.chars().all(|c| c.is_ascii_digit()) =>
        {
            name.to_string()
        }
        _ => last.to_string(),
    }
}
