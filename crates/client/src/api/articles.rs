use mythos_core::article::{Article, ArticleCreate, ArticleListParams, ArticleUpdate};
use mythos_core::types::DbId;

use crate::client::ApiClient;
use crate::error::ClientError;

/// `/articles` endpoints.
#[derive(Clone, Copy)]
pub struct ArticlesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ArticlesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List articles, filtered by project and by what `params.user_id` may see.
    pub async fn list(self, params: &ArticleListParams) -> Result<Vec<Article>, ClientError> {
        self.client.get_with_query("/articles", params).await
    }

    pub async fn get(self, id: DbId) -> Result<Article, ClientError> {
        self.client.get(&format!("/articles/{id}")).await
    }

    pub async fn create(self, input: &ArticleCreate) -> Result<Article, ClientError> {
        self.client.post("/articles", input).await
    }

    pub async fn update(self, id: DbId, input: &ArticleUpdate) -> Result<Article, ClientError> {
        self.client.put(&format!("/articles/{id}"), input).await
    }

    pub async fn delete(self, id: DbId) -> Result<(), ClientError> {
        self.client.delete(&format!("/articles/{id}")).await
    }
}
