//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use mythos_core::pagination::Page;
use mythos_core::project::{
    validate_create_project, validate_update_project, CreateProject, Project, ProjectListParams,
    UpdateProject,
};
use mythos_core::types::DbId;
use mythos_db::repositories::{ImageRepo, ProjectRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    validate_create_project(&input)?;
    if let Some(owner_id) = input.owner_id {
        UserRepo::find_by_id(&state.pool, owner_id)
            .await?
            .ok_or_else(|| AppError::not_found("User", owner_id))?;
    }
    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = project.id, name = %project.name, "Project created");
    Ok((StatusCode::CREATED, Json(project.into())))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<Vec<Project>>> {
    let (limit, offset) = Page {
        skip: params.skip,
        limit: params.limit,
    }
    .clamped();
    let projects = ProjectRepo::list(&state.pool, params.user_id, limit, offset).await?;
    Ok(Json(projects.into_iter().map(Project::from).collect()))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;
    Ok(Json(project.into()))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    validate_update_project(&input)?;
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Project", id))?;
    Ok(Json(project.into()))
}

/// DELETE /api/v1/projects/{id}
///
/// Articles and image rows go with the project; stored image files are
/// removed afterwards.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let images = ImageRepo::list_by_project(&state.pool, id, i64::MAX, 0).await?;
    if !ProjectRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Project", id));
    }
    for image in images {
        if let Err(e) = state.storage.remove(std::path::Path::new(&image.file_path)).await {
            tracing::warn!(image_id = image.id, error = %e, "Failed to remove image file");
        }
    }
    tracing::info!(project_id = id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
