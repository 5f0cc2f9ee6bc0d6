use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::ImageStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference counted and the rest sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mythos_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Local store for uploaded image files.
    pub storage: Arc<ImageStorage>,
}
