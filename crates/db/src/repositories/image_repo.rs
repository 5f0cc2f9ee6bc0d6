//! Repository for the `images` table.

use mythos_core::types::DbId;
use sqlx::PgPool;

use crate::models::image::{ImageRow, NewImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, filename, original_filename, alt_text, file_path, file_size, \
    mime_type, width, height, is_s3_stored, s3_bucket, project_id, created_at, updated_at";

/// Provides CRUD operations for image metadata. File bytes are handled by
/// the API's storage layer.
pub struct ImageRepo;

impl ImageRepo {
    pub async fn create(pool: &PgPool, input: &NewImage) -> Result<ImageRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO images
                (filename, original_filename, alt_text, file_path, file_size,
                 mime_type, width, height, project_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImageRow>(&query)
            .bind(&input.filename)
            .bind(&input.original_filename)
            .bind(&input.alt_text)
            .bind(&input.file_path)
            .bind(input.file_size)
            .bind(&input.mime_type)
            .bind(input.width)
            .bind(input.height)
            .bind(input.project_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ImageRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = $1");
        sqlx::query_as::<_, ImageRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Images of a project, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ImageRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM images
             WHERE project_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ImageRow>(&query)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Set the alt text. Returns `None` if no row with the given `id` exists.
    pub async fn update_alt_text(
        pool: &PgPool,
        id: DbId,
        alt_text: Option<&str>,
    ) -> Result<Option<ImageRow>, sqlx::Error> {
        let query = format!(
            "UPDATE images SET alt_text = COALESCE($2, alt_text)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImageRow>(&query)
            .bind(id)
            .bind(alt_text)
            .fetch_optional(pool)
            .await
    }

    /// Delete an image row, returning it so the caller can remove the file.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<ImageRow>, sqlx::Error> {
        let query = format!("DELETE FROM images WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, ImageRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
