//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers validate input with `mythos_core`, delegate to the corresponding
//! repository in `mythos_db` and map errors via [`AppError`](crate::error::AppError).

pub mod article;
pub mod image;
pub mod project;
pub mod user;
