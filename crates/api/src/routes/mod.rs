pub mod articles;
pub mod health;
pub mod images;
pub mod projects;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                                   list, create
/// /users/{id}                              get, update, delete
/// /users/{id}/with-projects                user with owned projects
/// /users/by-username/{username}            lookup by username
///
/// /projects                                list (?user_id), create
/// /projects/{id}                           get, update, delete
///
/// /articles                                list (?project_id&user_id), create
/// /articles/{id}                           get, update, delete
///
/// /images/upload                           multipart upload (POST)
/// /images/project/{project_id}             images of a project
/// /images/{id}                             get, update, delete
/// /images/{id}/file                        raw image bytes
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/projects", projects::router())
        .nest("/articles", articles::router())
        .nest("/images", images::router())
}
