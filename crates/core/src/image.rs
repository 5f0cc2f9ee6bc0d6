//! Uploaded image metadata and upload validation.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";
pub const MIME_WEBP: &str = "image/webp";
pub const MIME_GIF: &str = "image/gif";

/// MIME types accepted by the upload endpoint.
pub const ALLOWED_MIME_TYPES: &[&str] = &[MIME_JPEG, MIME_PNG, MIME_WEBP, MIME_GIF];

/// Default upload size cap in megabytes.
pub const DEFAULT_MAX_IMAGE_SIZE_MB: u64 = 10;

/// Stored image metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: DbId,
    pub filename: String,
    pub original_filename: String,
    pub alt_text: Option<String>,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub is_s3_stored: bool,
    pub s3_bucket: Option<String>,
    pub project_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Response body of `POST /images/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub id: DbId,
    pub filename: String,
    pub original_filename: String,
    pub file_size: i64,
    pub mime_type: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub url: String,
    pub project_id: DbId,
    pub alt_text: Option<String>,
    pub created_at: Timestamp,
}

impl ImageUpload {
    pub fn from_image(image: &Image) -> Self {
        Self {
            id: image.id,
            filename: image.filename.clone(),
            original_filename: image.original_filename.clone(),
            file_size: image.file_size,
            mime_type: image.mime_type.clone(),
            width: image.width,
            height: image.height,
            url: image_file_path(image.id),
            project_id: image.project_id,
            alt_text: image.alt_text.clone(),
            created_at: image.created_at,
        }
    }
}

/// DTO for updating image metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateImage {
    pub alt_text: Option<String>,
}

/// Path (relative to the API prefix) that serves the image bytes.
pub fn image_file_path(image_id: DbId) -> String {
    format!("/images/{image_id}/file")
}

/// Check an upload's MIME type and size against the allowed set and cap.
pub fn validate_upload(mime_type: &str, size_bytes: u64, max_size_mb: u64) -> Result<(), CoreError> {
    if !ALLOWED_MIME_TYPES.contains(&mime_type) {
        return Err(CoreError::Validation(format!(
            "Image type {mime_type} not allowed. Allowed types: {}",
            ALLOWED_MIME_TYPES.join(", ")
        )));
    }
    let max_bytes = max_size_mb * 1024 * 1024;
    if size_bytes > max_bytes {
        return Err(CoreError::Validation(format!(
            "Image size ({:.1}MB) exceeds maximum allowed size ({max_size_mb}MB)",
            size_bytes as f64 / (1024.0 * 1024.0)
        )));
    }
    if size_bytes == 0 {
        return Err(CoreError::Validation("Image file is empty".into()));
    }
    Ok(())
}

/// File extension (with dot) used when storing an image of this MIME type.
pub fn extension_for_mime(mime_type: &str) -> &'static str {
    match mime_type {
        MIME_JPEG => ".jpg",
        MIME_PNG => ".png",
        MIME_GIF => ".gif",
        _ => ".webp",
    }
}

/// Guess a MIME type from a filename's extension.
pub fn mime_for_filename(filename: &str) -> Option<&'static str> {
    let ext = filename.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some(MIME_JPEG),
        "png" => Some(MIME_PNG),
        "webp" => Some(MIME_WEBP),
        "gif" => Some(MIME_GIF),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_type_within_cap_passes() {
        assert!(validate_upload(MIME_PNG, 2048, 10).is_ok());
    }

    #[test]
    fn disallowed_type_rejected() {
        assert!(validate_upload("application/pdf", 2048, 10).is_err());
    }

    #[test]
    fn oversized_upload_rejected() {
        let err = validate_upload(MIME_JPEG, 11 * 1024 * 1024, 10).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));
    }

    #[test]
    fn empty_upload_rejected() {
        assert!(validate_upload(MIME_JPEG, 0, 10).is_err());
    }

    #[test]
    fn mime_guessing() {
        assert_eq!(mime_for_filename("map.PNG"), Some(MIME_PNG));
        assert_eq!(mime_for_filename("portrait.jpeg"), Some(MIME_JPEG));
        assert_eq!(mime_for_filename("notes.txt"), None);
        assert_eq!(mime_for_filename("noext"), None);
    }

    #[test]
    fn file_path_for_id() {
        assert_eq!(image_file_path(12), "/images/12/file");
        assert_eq!(extension_for_mime(MIME_JPEG), ".jpg");
    }
}
