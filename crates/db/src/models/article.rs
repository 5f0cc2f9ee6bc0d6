//! Article row model.
//!
//! The content blocks and the variant payloads are JSONB columns. Rows are
//! decoded leniently into [`Article`]; the table's CHECK constraints keep
//! the stored type and payloads consistent.

use mythos_core::article::{Article, ArticleBody, ArticleContent, Visibility};
use mythos_core::image::Image;
use mythos_core::person::PersonData;
use mythos_core::settlement::SettlementData;
use mythos_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `articles` table.
#[derive(Debug, Clone, FromRow)]
pub struct ArticleRow {
    pub id: DbId,
    pub title: String,
    pub content: Json<ArticleContent>,
    pub article_type: String,
    pub visibility: String,
    pub settlement_data: Option<Json<SettlementData>>,
    pub person_data: Option<Json<PersonData>>,
    pub author_id: Option<DbId>,
    pub project_id: DbId,
    pub header_image_id: Option<DbId>,
    pub spotify_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ArticleRow {
    /// The variant body stored in this row.
    pub fn body(&self) -> ArticleBody {
        ArticleBody::from_parts_lenient(
            &self.article_type,
            self.settlement_data.as_ref().map(|data| data.0.clone()),
            self.person_data.as_ref().map(|data| data.0.clone()),
        )
    }

    /// Convert to the API shape, attaching the resolved header image.
    pub fn into_article(self, header_image: Option<Image>) -> Article {
        let body = self.body();
        let visibility = self.visibility.parse().unwrap_or_else(|_| {
            tracing::warn!(
                article_id = self.id,
                visibility = %self.visibility,
                "Unknown stored visibility, treating as private"
            );
            Visibility::Private
        });
        Article {
            id: self.id,
            title: self.title,
            content: self.content.0,
            body,
            visibility,
            author_id: self.author_id,
            project_id: self.project_id,
            header_image_id: self.header_image_id,
            header_image,
            spotify_url: self.spotify_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        row.into_article(None)
    }
}
