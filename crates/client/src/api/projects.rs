use mythos_core::project::{CreateProject, Project, ProjectListParams, UpdateProject};
use mythos_core::types::DbId;

use crate::client::ApiClient;
use crate::error::ClientError;

/// `/projects` endpoints.
#[derive(Clone, Copy)]
pub struct ProjectsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProjectsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List projects, optionally only those owned by `params.user_id`.
    pub async fn list(self, params: &ProjectListParams) -> Result<Vec<Project>, ClientError> {
        self.client.get_with_query("/projects", params).await
    }

    pub async fn get(self, id: DbId) -> Result<Project, ClientError> {
        self.client.get(&format!("/projects/{id}")).await
    }

    pub async fn create(self, input: &CreateProject) -> Result<Project, ClientError> {
        self.client.post("/projects", input).await
    }

    pub async fn update(self, id: DbId, input: &UpdateProject) -> Result<Project, ClientError> {
        self.client.put(&format!("/projects/{id}"), input).await
    }

    pub async fn delete(self, id: DbId) -> Result<(), ClientError> {
        self.client.delete(&format!("/projects/{id}")).await
    }
}
