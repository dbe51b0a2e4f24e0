//! Upload fixtures

use axum_test::multipart::{MultipartForm, Part};

/// JPEG-looking payload of the given size
pub fn jpeg_bytes(size: usize) -> Vec<u8> {
    let mut data = vec![0u8; size.max(4)];
    data[..3].copy_from_slice(&[0xFF, 0xD8, 0xFF]);
    data.truncate(size);
    data
}

pub fn file_form(name: &str, mime: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(name.to_string())
        .mime_type(mime.to_string());
    MultipartForm::new().add_part("file", part)
}

pub fn jpeg_form(name: &str, size: usize) -> MultipartForm {
    file_form(name, "image/jpeg", jpeg_bytes(size))
}
