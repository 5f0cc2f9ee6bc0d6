use mythos_core::types::DbId;
use mythos_core::user::{CreateUser, UpdateUser, User, UserListParams, UserWithProjects};

use crate::client::ApiClient;
use crate::error::ClientError;

/// `/users` endpoints. Cheap to copy; methods take it by value so the
/// returned futures only borrow the underlying client.
#[derive(Clone, Copy)]
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(self, params: &UserListParams) -> Result<Vec<User>, ClientError> {
        self.client.get_with_query("/users", params).await
    }

    pub async fn get(self, id: DbId) -> Result<User, ClientError> {
        self.client.get(&format!("/users/{id}")).await
    }

    pub async fn get_by_username(self, username: &str) -> Result<User, ClientError> {
        self.client
            .get(&format!("/users/by-username/{}", urlencoding::encode(username)))
            .await
    }

    pub async fn get_with_projects(self, id: DbId) -> Result<UserWithProjects, ClientError> {
        self.client.get(&format!("/users/{id}/with-projects")).await
    }

    pub async fn create(self, input: &CreateUser) -> Result<User, ClientError> {
        self.client.post("/users", input).await
    }

    pub async fn update(self, id: DbId, input: &UpdateUser) -> Result<User, ClientError> {
        self.client.put(&format!("/users/{id}"), input).await
    }

    pub async fn delete(self, id: DbId) -> Result<(), ClientError> {
        self.client.delete(&format!("/users/{id}")).await
    }
}
