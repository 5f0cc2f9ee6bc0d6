//! Typed resource APIs over [`ApiClient`].
//!
//! Each is a borrowed view (`client.users()`, `client.articles()`, ...) so
//! one client is shared by all of them.

mod articles;
mod images;
mod projects;
mod users;

pub use articles::ArticlesApi;
pub use images::{ImageFile, ImagesApi};
pub use projects::ProjectsApi;
pub use users::UsersApi;

use crate::client::ApiClient;

impl ApiClient {
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn projects(&self) -> ProjectsApi<'_> {
        ProjectsApi::new(self)
    }

    pub fn articles(&self) -> ArticlesApi<'_> {
        ArticlesApi::new(self)
    }

    pub fn images(&self) -> ImagesApi<'_> {
        ImagesApi::new(self)
    }
}
