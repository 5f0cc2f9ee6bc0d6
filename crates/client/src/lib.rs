//! Client side of Mythos Engine.
//!
//! [`ApiClient`] talks to the REST API; the typed resource APIs in [`api`]
//! sit on top of it. [`Queries`] adds a keyed cache that mutations
//! invalidate, so reads after a write refetch. Image conversion and the
//! best-effort uploader live in [`convert`] and [`upload`].

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod queries;
pub mod query_keys;
pub mod upload;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ClientError};
pub use queries::{Queries, QueryState};
