//! Shared contract types for Mythos Engine: users, projects, articles and
//! images, plus validation and pagination helpers used by both the API server
//! and its clients.

pub mod naming;

pub mod article;
pub mod error;
pub mod image;
pub mod pagination;
pub mod person;
pub mod project;
pub mod settlement;
pub mod types;
pub mod user;
