//! Row models.
//!
//! Each submodule holds a `FromRow` struct matching its table and a
//! conversion into the shared `mythos_core` type served by the API. Request
//! DTOs live in `mythos_core` since clients build them too.

pub mod article;
pub mod image;
pub mod project;
pub mod user;
