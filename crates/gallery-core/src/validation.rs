//! Upload validation shared by every way a file can enter the upload flow.

use crate::constants::MAX_UPLOAD_BYTES;
use crate::models::PhotoFile;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid content type: {0} (expected image/*)")]
    NotAnImage(String),

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },
}

impl ValidationError {
    /// Message shown to the user when the file came from the picker
    pub fn picker_message(&self) -> &'static str {
        match self {
            ValidationError::NotAnImage(_) => "Please select a valid image file",
            ValidationError::FileTooLarge { .. } => "The file is too large. Maximum 10MB",
        }
    }
}

/// Checks that a file is an image no larger than the upload limit.
#[derive(Debug, Clone, Copy)]
pub struct ImageValidator {
    max_file_size: usize,
}

impl Default for ImageValidator {
    fn default() -> Self {
        Self::new(MAX_UPLOAD_BYTES)
    }
}

impl ImageValidator {
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    /// MIME type first, then size.
    pub fn validate(&self, file: &PhotoFile) -> Result<(), ValidationError> {
        if !file.is_image() {
            return Err(ValidationError::NotAnImage(file.content_type.clone()));
        }

        if file.size() > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size: file.size(),
                max: self.max_file_size,
            });
        }

        Ok(())
    }
}
