//! Image row model and insert DTO.

use mythos_core::image::Image;
use mythos_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `images` table.
#[derive(Debug, Clone, FromRow)]
pub struct ImageRow {
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

impl From<ImageRow> for Image {
    fn from(row: ImageRow) -> Self {
        Image {
            id: row.id,
            filename: row.filename,
            original_filename: row.original_filename,
            alt_text: row.alt_text,
            file_path: row.file_path,
            file_size: row.file_size,
            mime_type: row.mime_type,
            width: row.width,
            height: row.height,
            is_s3_stored: row.is_s3_stored,
            s3_bucket: row.s3_bucket,
            project_id: row.project_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Metadata for an image whose bytes are already on disk.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub filename: String,
    pub original_filename: String,
    pub alt_text: Option<String>,
    pub file_path: String,
    pub file_size: i64,
    pub mime_type: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub project_id: DbId,
}
