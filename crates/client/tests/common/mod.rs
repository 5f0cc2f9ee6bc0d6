#![allow(dead_code)]

//! In-process mock of the Mythos REST API.
//!
//! Serves a small fixed data set on an ephemeral port and counts the
//! requests each route receives, so tests can tell cache hits from
//! refetches.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use mythos_client::{ApiClient, ClientConfig, Queries};

pub const TS: &str = "2024-01-01T00:00:00Z";

#[derive(Default)]
pub struct Mock {
    hits: Mutex<HashMap<String, usize>>,
    pub last_query: Mutex<Option<String>>,
    next_id: AtomicUsize,
}

impl Mock {
    fn hit(&self, route: &str) {
        let mut hits = self.hits.lock().unwrap();
        *hits.entry(route.to_string()).or_default() += 1;
    }

    pub fn hits(&self, route: &str) -> usize {
        self.hits.lock().unwrap().get(route).copied().unwrap_or(0)
    }

    fn next_id(&self) -> i64 {
        100 + self.next_id.fetch_add(1, Ordering::SeqCst) as i64
    }
}

pub struct MockServer {
    pub base_url: String,
    pub mock: Arc<Mock>,
}

impl MockServer {
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&ClientConfig::new(self.base_url.clone()))
    }

    pub fn queries(&self) -> Queries {
        Queries::new(self.client())
    }
}

pub async fn start() -> MockServer {
    let mock = Arc::new(Mock::default());
    let api = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/users/by-username/{username}", get(get_user_by_username))
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{id}", get(get_project).delete(delete_project))
        .route("/articles", get(list_articles).post(create_article))
        .route(
            "/articles/{id}",
            get(get_article).put(update_article).delete(delete_article),
        )
        .route("/images/upload", post(upload_image))
        .route("/images/project/{id}", get(list_images))
        .route("/boom", get(boom))
        .route("/plain", get(plain))
        .route("/echo-headers", get(echo_headers))
        .with_state(mock.clone());
    let app = Router::new().nest("/api/v1", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockServer {
        base_url: format!("http://{addr}/api/v1"),
        mock,
    }
}

fn not_found(entity: &str, id: impl std::fmt::Display) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": format!("{entity} with id {id} not found"), "code": "NOT_FOUND"})),
    )
        .into_response()
}

pub fn user_json(id: i64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "full_name": null,
        "bio": null,
        "avatar_url": null,
        "is_active": true,
        "created_at": TS,
        "updated_at": TS,
    })
}

pub fn project_json(id: i64, name: &str, owner_id: Option<i64>) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": null,
        "owner_id": owner_id,
        "created_at": TS,
        "updated_at": TS,
    })
}

pub fn article_json(id: i64, project_id: i64) -> Value {
    json!({
        "id": id,
        "title": "Port Varrow",
        "content": {"summary": "A harbour town", "tags": ["coast"]},
        "article_type": "location",
        "settlement_data": {"settlement_type": "town", "population": 4200},
        "visibility": "public",
        "author_id": 1,
        "project_id": project_id,
        "header_image_id": null,
        "spotify_url": null,
        "created_at": TS,
        "updated_at": TS,
    })
}

async fn list_users(State(mock): State<Arc<Mock>>, RawQuery(query): RawQuery) -> Json<Value> {
    mock.hit("users.list");
    *mock.last_query.lock().unwrap() = query;
    Json(json!([user_json(1, "ursula")]))
}

async fn create_user(State(mock): State<Arc<Mock>>, Json(body): Json<Value>) -> Response {
    mock.hit("users.create");
    let username = body["username"].as_str().unwrap_or_default().to_string();
    if username == "taken" {
        return (
            StatusCode::CONFLICT,
            Json(json!({"detail": "Username already registered", "code": "CONFLICT"})),
        )
            .into_response();
    }
    (StatusCode::CREATED, Json(user_json(mock.next_id(), &username))).into_response()
}

async fn get_user(State(mock): State<Arc<Mock>>, Path(id): Path<i64>) -> Response {
    mock.hit("users.get");
    if id == 1 {
        Json(user_json(1, "ursula")).into_response()
    } else {
        not_found("User", id)
    }
}

async fn update_user(
    State(mock): State<Arc<Mock>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    mock.hit("users.update");
    let username = body["username"].as_str().unwrap_or("ursula");
    Json(user_json(id, username))
}

async fn delete_user(State(mock): State<Arc<Mock>>) -> StatusCode {
    mock.hit("users.delete");
    StatusCode::NO_CONTENT
}

async fn get_user_by_username(
    State(mock): State<Arc<Mock>>,
    Path(username): Path<String>,
) -> Json<Value> {
    mock.hit("users.by_username");
    Json(user_json(1, &username))
}

async fn list_projects(State(mock): State<Arc<Mock>>, RawQuery(query): RawQuery) -> Json<Value> {
    mock.hit("projects.list");
    *mock.last_query.lock().unwrap() = query;
    Json(json!([project_json(4, "The Shattered Isles", Some(1))]))
}

async fn create_project(State(mock): State<Arc<Mock>>, Json(body): Json<Value>) -> Response {
    mock.hit("projects.create");
    let name = body["name"].as_str().unwrap_or_default();
    let owner = body["owner_id"].as_i64();
    (StatusCode::CREATED, Json(project_json(mock.next_id(), name, owner))).into_response()
}

async fn get_project(State(mock): State<Arc<Mock>>, Path(id): Path<i64>) -> Response {
    mock.hit("projects.get");
    if id == 4 {
        Json(project_json(4, "The Shattered Isles", Some(1))).into_response()
    } else {
        not_found("Project", id)
    }
}

async fn delete_project(State(mock): State<Arc<Mock>>) -> StatusCode {
    mock.hit("projects.delete");
    StatusCode::NO_CONTENT
}

async fn list_articles(State(mock): State<Arc<Mock>>, RawQuery(query): RawQuery) -> Json<Value> {
    mock.hit("articles.list");
    *mock.last_query.lock().unwrap() = query;
    Json(json!([article_json(10, 4)]))
}

async fn create_article(State(mock): State<Arc<Mock>>, Json(body): Json<Value>) -> Response {
    mock.hit("articles.create");
    let project_id = body["project_id"].as_i64().unwrap_or(4);
    (
        StatusCode::CREATED,
        Json(article_json(mock.next_id(), project_id)),
    )
        .into_response()
}

async fn get_article(State(mock): State<Arc<Mock>>, Path(id): Path<i64>) -> Json<Value> {
    mock.hit("articles.get");
    Json(article_json(id, 4))
}

async fn update_article(State(mock): State<Arc<Mock>>, Path(id): Path<i64>) -> Json<Value> {
    mock.hit("articles.update");
    Json(article_json(id, 4))
}

async fn delete_article(State(mock): State<Arc<Mock>>) -> StatusCode {
    mock.hit("articles.delete");
    StatusCode::NO_CONTENT
}

async fn upload_image(State(mock): State<Arc<Mock>>, mut multipart: Multipart) -> Response {
    mock.hit("images.upload");
    let mut filename = String::new();
    let mut project_id = 0_i64;
    let mut alt_text: Option<String> = None;
    let mut size = 0_usize;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                filename = field.file_name().unwrap_or_default().to_string();
                size = field.bytes().await.map(|b| b.len()).unwrap_or(0);
            }
            "project_id" => {
                project_id = field.text().await.unwrap_or_default().parse().unwrap_or(0);
            }
            "alt_text" => alt_text = field.text().await.ok(),
            _ => {}
        }
    }
    if filename.starts_with("bad") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Image type text/plain not allowed", "code": "BAD_REQUEST"})),
        )
            .into_response();
    }
    let id = mock.next_id();
    (
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "filename": format!("{id}.png"),
            "original_filename": filename,
            "file_size": size,
            "mime_type": "image/png",
            "width": 4,
            "height": 4,
            "url": format!("/images/{id}/file"),
            "project_id": project_id,
            "alt_text": alt_text,
            "created_at": TS,
        })),
    )
        .into_response()
}

async fn list_images(State(mock): State<Arc<Mock>>) -> Json<Value> {
    mock.hit("images.list");
    Json(json!([]))
}

async fn boom() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "kaboom").into_response()
}

async fn plain() -> &'static str {
    "hello"
}

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let trace = headers
        .get("x-trace")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({"x_trace": trace, "content_type": content_type}))
}
