//! Handlers for the `/articles` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use mythos_core::article::{
    validate_create_article, validate_update_article, Article, ArticleCreate, ArticleListParams,
    ArticleUpdate,
};
use mythos_core::image::Image;
use mythos_core::pagination::Page;
use mythos_core::types::DbId;
use mythos_db::models::article::ArticleRow;
use mythos_db::repositories::{ArticleRepo, ImageRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Resolve the header image and convert the row to its API shape.
async fn with_header_image(state: &AppState, row: ArticleRow) -> AppResult<Article> {
    let header_image = match row.header_image_id {
        Some(image_id) => ImageRepo::find_by_id(&state.pool, image_id)
            .await?
            .map(Image::from),
        None => None,
    };
    Ok(row.into_article(header_image))
}

async fn ensure_project(state: &AppState, project_id: DbId) -> AppResult<()> {
    ProjectRepo::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", project_id))?;
    Ok(())
}

/// GET /api/v1/articles
///
/// `user_id` identifies the viewer; only articles visible to them are
/// returned.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ArticleListParams>,
) -> AppResult<Json<Vec<Article>>> {
    let (limit, offset) = Page {
        skip: params.skip,
        limit: params.limit,
    }
    .clamped();
    let rows =
        ArticleRepo::list(&state.pool, params.project_id, params.user_id, limit, offset).await?;
    let mut articles = Vec::with_capacity(rows.len());
    for row in rows {
        articles.push(with_header_image(&state, row).await?);
    }
    Ok(Json(articles))
}

/// POST /api/v1/articles
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<ArticleCreate>,
) -> AppResult<(StatusCode, Json<Article>)> {
    let body = validate_create_article(&input)?;
    ensure_project(&state, input.project_id).await?;
    let row = ArticleRepo::create(&state.pool, &input, &body).await?;
    tracing::info!(
        article_id = row.id,
        project_id = row.project_id,
        article_type = %row.article_type,
        "Article created"
    );
    let article = with_header_image(&state, row).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

/// GET /api/v1/articles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Article>> {
    let row = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Article", id))?;
    Ok(Json(with_header_image(&state, row).await?))
}

/// PUT /api/v1/articles/{id}
///
/// Fields are merged into the stored article. Changing `article_type`
/// drops a stored payload the new type cannot carry.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ArticleUpdate>,
) -> AppResult<Json<Article>> {
    validate_update_article(&input)?;
    let current = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Article", id))?;
    let body = current.body().apply_update(
        input.article_type.as_deref(),
        input.settlement_data.clone(),
        input.person_data.clone(),
    )?;
    let row = ArticleRepo::update(&state.pool, id, &input, &body)
        .await?
        .ok_or_else(|| AppError::not_found("Article", id))?;
    Ok(Json(with_header_image(&state, row).await?))
}

/// DELETE /api/v1/articles/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ArticleRepo::delete(&state.pool, id).await? {
        tracing::info!(article_id = id, "Article deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Article", id))
    }
}
