//! Repository for the `articles` table.

use mythos_core::article::{ArticleBody, ArticleCreate, ArticleUpdate};
use mythos_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::article::ArticleRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, content, article_type, visibility, settlement_data, \
    person_data, author_id, project_id, header_image_id, spotify_url, created_at, updated_at";

/// SQL form of `Visibility::is_visible_to` for viewer parameter `$n`.
fn visibility_filter(viewer_param: usize) -> String {
    format!(
        "(visibility = 'public'
          OR (${viewer_param}::BIGINT IS NOT NULL
              AND (visibility = 'private'
                   OR (visibility = 'unlisted' AND author_id = ${viewer_param}))))"
    )
}

/// Provides CRUD operations for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article. `body` must be the validated body of `input`.
    pub async fn create(
        pool: &PgPool,
        input: &ArticleCreate,
        body: &ArticleBody,
    ) -> Result<ArticleRow, sqlx::Error> {
        let parts = body.clone().into_parts();
        let query = format!(
            "INSERT INTO articles
                (title, content, article_type, visibility, settlement_data, person_data,
                 author_id, project_id, header_image_id, spotify_url)
             VALUES ($1, COALESCE($2, '{{}}'::jsonb), $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(&input.title)
            .bind(input.content.as_ref().map(Json))
            .bind(&parts.article_type)
            .bind(input.visibility.as_str())
            .bind(parts.settlement_data.as_ref().map(Json))
            .bind(parts.person_data.as_ref().map(Json))
            .bind(input.author_id)
            .bind(input.project_id)
            .bind(input.header_image_id)
            .bind(&input.spotify_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ArticleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List articles visible to `viewer`, newest first, optionally limited
    /// to one project.
    pub async fn list(
        pool: &PgPool,
        project_id: Option<DbId>,
        viewer: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ArticleRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles
             WHERE ($1::BIGINT IS NULL OR project_id = $1)
               AND {}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4",
            visibility_filter(2)
        );
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(project_id)
            .bind(viewer)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update an article. Scalar fields are applied when present; the type and
    /// both payload columns are always replaced from `body`, which the caller
    /// has already merged with the stored one.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ArticleUpdate,
        body: &ArticleBody,
    ) -> Result<Option<ArticleRow>, sqlx::Error> {
        let parts = body.clone().into_parts();
        let query = format!(
            "UPDATE articles SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                visibility = COALESCE($4, visibility),
                header_image_id = COALESCE($5, header_image_id),
                spotify_url = COALESCE($6, spotify_url),
                article_type = $7,
                settlement_data = $8,
                person_data = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.content.as_ref().map(Json))
            .bind(input.visibility.map(|v| v.as_str()))
            .bind(input.header_image_id)
            .bind(&input.spotify_url)
            .bind(&parts.article_type)
            .bind(parts.settlement_data.as_ref().map(Json))
            .bind(parts.person_data.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Delete an article by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_filter_uses_requested_parameter() {
        let sql = visibility_filter(2);
        assert!(sql.contains("$2::BIGINT IS NOT NULL"));
        assert!(sql.contains("author_id = $2"));
        assert!(!sql.contains("$1"));
    }
}
