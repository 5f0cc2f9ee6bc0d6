#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use mythos_api::config::ServerConfig;
use mythos_api::router::build_app_router;
use mythos_api::state::AppState;
use mythos_api::storage::ImageStorage;

/// Build a test `ServerConfig` with safe defaults and a private storage dir.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        image_storage_dir: test_storage_dir(),
        max_image_size_mb: 1,
    }
}

fn test_storage_dir() -> PathBuf {
    std::env::temp_dir().join(format!("mythos-api-test-{}", uuid::Uuid::new_v4()))
}

/// Build the full application router, with all middleware layers, on the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    std::fs::create_dir_all(&config.image_storage_dir).unwrap();
    let state = AppState {
        pool,
        storage: Arc::new(ImageStorage::new(config.image_storage_dir.clone())),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty(), None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Body::empty(), None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        Body::from(json.to_string()),
        Some("application/json"),
    )
    .await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(
        app,
        Method::PUT,
        uri,
        Body::from(json.to_string()),
        Some("application/json"),
    )
    .await
}

/// POST a multipart form. `file` is `(filename, content_type, bytes)`.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Response<Body> {
    const BOUNDARY: &str = "mythos-test-boundary";
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content_type, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
    send(app, Method::POST, uri, Body::from(body), Some(&content_type)).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Body,
    content_type: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header("content-type", ct);
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Create a user through the API and return its id.
pub async fn create_user(pool: &PgPool, username: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/users",
        serde_json::json!({"username": username, "email": format!("{username}@example.com")}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a project through the API and return its id.
pub async fn create_project(pool: &PgPool, name: &str, owner_id: Option<i64>) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/projects",
        serde_json::json!({"name": name, "owner_id": owner_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
