//! Cached reads and invalidating mutations.
//!
//! Reads return the cached value for their key or fetch and cache it.
//! Mutations call the API and, on success, invalidate the keys whose data
//! they changed so the next read refetches. There are no optimistic
//! updates and no retries.

use std::future::Future;
use std::sync::Arc;

use mythos_core::article::{Article, ArticleCreate, ArticleListParams, ArticleUpdate};
use mythos_core::image::{Image, ImageUpload, UpdateImage};
use mythos_core::pagination::Page;
use mythos_core::project::{CreateProject, Project, ProjectListParams, UpdateProject};
use mythos_core::types::DbId;
use mythos_core::user::{CreateUser, UpdateUser, User, UserListParams, UserWithProjects};

use crate::api::ImageFile;
use crate::cache::QueryCache;
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::query_keys::{self, QueryKey};

/// What a page renders for one query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Idle,
    Loading,
    Ready(T),
    /// The request failed; holds a message fit for display.
    Failed(String),
}

impl<T> QueryState<T> {
    pub fn from_result(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(value) => QueryState::Ready(value),
            Err(err) => QueryState::Failed(err.user_message()),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        match self {
            QueryState::Idle => QueryState::Idle,
            QueryState::Loading => QueryState::Loading,
            QueryState::Ready(value) => QueryState::Ready(f(value)),
            QueryState::Failed(message) => QueryState::Failed(message),
        }
    }
}

#[derive(Clone)]
pub struct Queries {
    client: ApiClient,
    cache: Arc<QueryCache>,
}

impl Queries {
    pub fn new(client: ApiClient) -> Self {
        Self::with_cache(client, Arc::new(QueryCache::new()))
    }

    pub fn with_cache(client: ApiClient, cache: Arc<QueryCache>) -> Self {
        Self { client, cache }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    async fn cached<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T, ClientError>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        if let Some(hit) = self.cache.get::<T>(&key) {
            tracing::trace!(key = %key, "Query cache hit");
            return Ok(hit);
        }
        let value = fetch().await?;
        self.cache.insert(key, value.clone());
        Ok(value)
    }

    fn invalidate(&self, keys: &[QueryKey]) {
        for key in keys {
            self.cache.invalidate(key);
        }
    }

    // ---- reads ----

    pub async fn users(&self, params: &UserListParams) -> Result<Vec<User>, ClientError> {
        self.cached(query_keys::users::list(params), || {
            self.client.users().list(params)
        })
        .await
    }

    pub async fn user(&self, id: DbId) -> Result<User, ClientError> {
        self.cached(query_keys::users::detail(id), || self.client.users().get(id))
            .await
    }

    pub async fn user_by_username(&self, username: &str) -> Result<User, ClientError> {
        self.cached(query_keys::users::by_username(username), || {
            self.client.users().get_by_username(username)
        })
        .await
    }

    pub async fn user_with_projects(&self, id: DbId) -> Result<UserWithProjects, ClientError> {
        self.cached(query_keys::users::with_projects(id), || {
            self.client.users().get_with_projects(id)
        })
        .await
    }

    pub async fn projects(&self, params: &ProjectListParams) -> Result<Vec<Project>, ClientError> {
        self.cached(query_keys::projects::list(params), || {
            self.client.projects().list(params)
        })
        .await
    }

    pub async fn project(&self, id: DbId) -> Result<Project, ClientError> {
        self.cached(query_keys::projects::detail(id), || {
            self.client.projects().get(id)
        })
        .await
    }

    pub async fn articles(&self, params: &ArticleListParams) -> Result<Vec<Article>, ClientError> {
        self.cached(query_keys::articles::list(params), || {
            self.client.articles().list(params)
        })
        .await
    }

    pub async fn article(&self, id: DbId) -> Result<Article, ClientError> {
        self.cached(query_keys::articles::detail(id), || {
            self.client.articles().get(id)
        })
        .await
    }

    pub async fn project_images(
        &self,
        project_id: DbId,
        page: &Page,
    ) -> Result<Vec<Image>, ClientError> {
        self.cached(query_keys::images::by_project(project_id, page), || {
            self.client.images().list_by_project(project_id, page)
        })
        .await
    }

    // ---- user mutations ----

    pub async fn create_user(&self, input: &CreateUser) -> Result<User, ClientError> {
        let user = self.client.users().create(input).await?;
        self.invalidate(&[query_keys::users::lists()]);
        Ok(user)
    }

    /// Invalidates every by-username entry: the old username is not known
    /// unless the user was cached.
    pub async fn update_user(&self, id: DbId, input: &UpdateUser) -> Result<User, ClientError> {
        let user = self.client.users().update(id, input).await?;
        self.invalidate(&[
            query_keys::users::detail(id),
            query_keys::users::by_usernames(),
            query_keys::users::with_projects(id),
            query_keys::users::lists(),
        ]);
        Ok(user)
    }

    /// Projects are invalidated too: their `owner_id` is nulled.
    pub async fn delete_user(&self, id: DbId) -> Result<(), ClientError> {
        self.client.users().delete(id).await?;
        self.invalidate(&[query_keys::users::all(), query_keys::projects::all()]);
        Ok(())
    }

    // ---- project mutations ----

    pub async fn create_project(&self, input: &CreateProject) -> Result<Project, ClientError> {
        let project = self.client.projects().create(input).await?;
        let mut keys = vec![query_keys::projects::lists()];
        if let Some(owner_id) = project.owner_id {
            keys.push(query_keys::users::with_projects(owner_id));
        }
        self.invalidate(&keys);
        Ok(project)
    }

    pub async fn update_project(
        &self,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Project, ClientError> {
        let project = self.client.projects().update(id, input).await?;
        let mut keys = vec![
            query_keys::projects::detail(id),
            query_keys::projects::lists(),
        ];
        if let Some(owner_id) = project.owner_id {
            keys.push(query_keys::users::with_projects(owner_id));
        }
        self.invalidate(&keys);
        Ok(project)
    }

    /// Also drops every cached article and the project's image list. The
    /// server deletes the project's articles along with it, and article
    /// details are keyed by id alone.
    pub async fn delete_project(&self, id: DbId) -> Result<(), ClientError> {
        self.client.projects().delete(id).await?;
        self.invalidate(&[
            query_keys::projects::detail(id),
            query_keys::projects::lists(),
            query_keys::articles::all(),
            query_keys::images::project(id),
            query_keys::users::all_with_projects(),
        ]);
        Ok(())
    }

    // ---- article mutations ----

    fn article_keys(id: DbId, project_id: DbId) -> [QueryKey; 3] {
        [
            query_keys::articles::detail(id),
            query_keys::articles::project_lists(project_id),
            query_keys::articles::unscoped_lists(),
        ]
    }

    pub async fn create_article(&self, input: &ArticleCreate) -> Result<Article, ClientError> {
        let article = self.client.articles().create(input).await?;
        self.invalidate(&Self::article_keys(article.id, article.project_id));
        Ok(article)
    }

    pub async fn update_article(
        &self,
        id: DbId,
        input: &ArticleUpdate,
    ) -> Result<Article, ClientError> {
        let article = self.client.articles().update(id, input).await?;
        self.invalidate(&Self::article_keys(id, article.project_id));
        Ok(article)
    }

    /// The parent project is read from the cached article. Without one,
    /// every article list is invalidated.
    pub async fn delete_article(&self, id: DbId) -> Result<(), ClientError> {
        let cached = self
            .cache
            .get::<Article>(&query_keys::articles::detail(id));
        self.client.articles().delete(id).await?;
        match cached {
            Some(article) => self.invalidate(&Self::article_keys(id, article.project_id)),
            None => self.invalidate(&[
                query_keys::articles::detail(id),
                query_keys::articles::lists(),
            ]),
        }
        Ok(())
    }

    // ---- image mutations ----

    pub async fn upload_image(
        &self,
        file: ImageFile,
        project_id: DbId,
        alt_text: Option<&str>,
    ) -> Result<ImageUpload, ClientError> {
        let uploaded = self.client.images().upload(file, project_id, alt_text).await?;
        self.invalidate(&[query_keys::images::project(project_id)]);
        Ok(uploaded)
    }

    pub async fn update_image(&self, id: DbId, input: &UpdateImage) -> Result<Image, ClientError> {
        let image = self.client.images().update(id, input).await?;
        self.invalidate(&[query_keys::images::project(image.project_id)]);
        Ok(image)
    }

    /// Articles are invalidated too: a deleted header image is unset on
    /// every article that used it.
    pub async fn delete_image(&self, id: DbId, project_id: DbId) -> Result<(), ClientError> {
        self.client.images().delete(id).await?;
        self.invalidate(&[
            query_keys::images::project(project_id),
            query_keys::articles::all(),
        ]);
        Ok(())
    }
}
