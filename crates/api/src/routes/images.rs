//! Route definitions for the `/images` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::image;
use crate::state::AppState;

/// Routes mounted at `/images`.
///
/// ```text
/// POST   /upload                  -> upload (multipart)
/// GET    /project/{project_id}    -> list_by_project
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update
/// DELETE /{id}                    -> delete
/// GET    /{id}/file               -> file
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(image::upload))
        .route("/project/{project_id}", get(image::list_by_project))
        .route(
            "/{id}",
            get(image::get_by_id).put(image::update).delete(image::delete),
        )
        .route("/{id}/file", get(image::file))
}
