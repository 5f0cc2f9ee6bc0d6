//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod article_repo;
pub mod image_repo;
pub mod project_repo;
pub mod user_repo;

pub use article_repo::ArticleRepo;
pub use image_repo::ImageRepo;
pub use project_repo::ProjectRepo;
pub use user_repo::UserRepo;
