use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthReport {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
    pub database: bool,
    /// The image directory exists and is a directory.
    pub image_storage: bool,
}

/// `GET /health`. Always 200; `status` is `degraded` when a dependency is down.
async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let database = mythos_db::health_check(&state.pool).await.is_ok();
    let image_storage = tokio::fs::metadata(state.storage.root())
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    if !database || !image_storage {
        tracing::warn!(database, image_storage, "Health check degraded");
    }

    Json(HealthReport {
        service: "mythos-api",
        status: if database && image_storage { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
        image_storage,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
