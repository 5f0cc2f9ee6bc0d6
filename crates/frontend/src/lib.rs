//! Terminal frontend for Mythos Engine.
//!
//! Articles are edited through forms and shown through views; both are
//! picked by [`dispatch`] from the article's kind. Pages tie routes to the
//! cached queries in `mythos-client`, and [`session`] remembers the user
//! currently selected.

pub mod dispatch;
pub mod error;
pub mod forms;
pub mod pages;
pub mod routes;
pub mod session;
pub mod views;

pub use dispatch::{ArticleForm, ArticleSubmission, ArticleView, FormContext, FormOutcome};
pub use error::FormError;
pub use routes::Route;
pub use session::UserSession;
