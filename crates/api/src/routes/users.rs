//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                          -> list (?skip&limit&active_only)
/// POST   /                          -> create
/// GET    /by-username/{username}    -> get_by_username
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// GET    /{id}/with-projects        -> get_with_projects
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(user::list).post(user::create))
        .route("/by-username/{username}", get(user::get_by_username))
        .route(
            "/{id}",
            get(user::get_by_id).put(user::update).delete(user::delete),
        )
        .route("/{id}/with-projects", get(user::get_with_projects))
}
