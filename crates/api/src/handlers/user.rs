//! Handlers for the `/users` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use mythos_core::error::CoreError;
use mythos_core::pagination::Page;
use mythos_core::project::Project;
use mythos_core::types::DbId;
use mythos_core::user::{
    validate_create_user, validate_update_user, CreateUser, UpdateUser, User, UserListParams,
    UserWithProjects,
};
use mythos_db::repositories::{ProjectRepo, UserRepo};

use crate::error::{unique_violation, AppError, AppResult};
use crate::state::AppState;

/// Turn username/email unique violations into readable conflicts.
fn map_unique(err: sqlx::Error) -> AppError {
    match unique_violation(&err) {
        Some("uq_users_username") => {
            CoreError::Conflict("Username already registered".into()).into()
        }
        Some("uq_users_email") => CoreError::Conflict("Email already registered".into()).into(),
        _ => err.into(),
    }
}

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .map(User::from)
        .ok_or_else(|| AppError::not_found("User", id))
}

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
) -> AppResult<Json<Vec<User>>> {
    let (limit, offset) = Page {
        skip: params.skip,
        limit: params.limit,
    }
    .clamped();
    let active_only = params.active_only.unwrap_or(true);
    let users = UserRepo::list(&state.pool, active_only, limit, offset).await?;
    Ok(Json(users.into_iter().map(User::from).collect()))
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    validate_create_user(&input)?;
    let user = UserRepo::create(&state.pool, &input)
        .await
        .map_err(map_unique)?;
    tracing::info!(user_id = user.id, username = %user.username, "User created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    Ok(Json(find_user(&state, id).await?))
}

/// GET /api/v1/users/by-username/{username}
pub async fn get_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundByKey {
            entity: "User",
            key: username,
        }))?;
    Ok(Json(user.into()))
}

/// GET /api/v1/users/{id}/with-projects
pub async fn get_with_projects(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserWithProjects>> {
    let user = find_user(&state, id).await?;
    let projects = ProjectRepo::list_by_owner(&state.pool, id)
        .await?
        .into_iter()
        .map(Project::from)
        .collect();
    Ok(Json(UserWithProjects { user, projects }))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    validate_update_user(&input)?;
    let user = UserRepo::update(&state.pool, id, &input)
        .await
        .map_err(map_unique)?
        .ok_or_else(|| AppError::not_found("User", id))?;
    Ok(Json(user.into()))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if UserRepo::delete(&state.pool, id).await? {
        tracing::info!(user_id = id, "User deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("User", id))
    }
}
