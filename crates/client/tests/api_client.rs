mod common;

use assert_matches::assert_matches;
use mythos_client::error::ResponseBody;
use mythos_client::{ApiClient, ClientConfig, ClientError};
use mythos_core::article::{ArticleBody, ArticleListParams, ArticleType};
use mythos_core::project::ProjectListParams;
use mythos_core::user::{CreateUser, UserListParams};
use serde_json::Value;

#[tokio::test]
async fn get_decodes_typed_user() {
    let server = common::start().await;
    let user = server.client().users().get(1).await.unwrap();
    assert_eq!(user.username, "ursula");
    assert!(user.is_active);
}

#[tokio::test]
async fn username_with_reserved_characters_stays_one_segment() {
    let server = common::start().await;
    let user = server.client().users().get_by_username("a b/c").await.unwrap();
    assert_eq!(user.username, "a b/c");
    assert_eq!(server.mock.hits("users.by_username"), 1);
}

#[tokio::test]
async fn not_found_carries_status_and_detail() {
    let server = common::start().await;
    let err = server.client().users().get(9).await.unwrap_err();
    assert_matches!(&err, ClientError::Api(api) if api.status == 404);
    assert_eq!(err.user_message(), "User with id 9 not found");
    if let ClientError::Api(api) = err {
        assert!(api.url.ends_with("/api/v1/users/9"));
        assert_eq!(api.body.code(), Some("NOT_FOUND"));
    }
}

#[tokio::test]
async fn non_json_error_gets_generic_message() {
    let server = common::start().await;
    let err = server.client().get::<Value>("/boom").await.unwrap_err();
    match err {
        ClientError::Api(api) => {
            assert_eq!(api.status, 500);
            assert_eq!(api.message, "Request failed with status 500");
            assert_eq!(api.body, ResponseBody::Text("kaboom".into()));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_url_includes_query_string() {
    let server = common::start().await;
    let err = server
        .client()
        .get_with_query::<_, Value>("/boom", &[("page", "2"), ("per_page", "10")])
        .await
        .unwrap_err();
    match err {
        ClientError::Api(api) => {
            assert_eq!(api.status, 500);
            assert!(
                api.url.ends_with("/api/v1/boom?page=2&per_page=10"),
                "{}",
                api.url
            );
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn conflict_on_create() {
    let server = common::start().await;
    let input = CreateUser {
        username: "taken".into(),
        email: "taken@example.com".into(),
        full_name: None,
        bio: None,
        avatar_url: None,
    };
    let err = server.client().users().create(&input).await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert_eq!(err.user_message(), "Username already registered");
}

#[tokio::test]
async fn text_body_for_typed_request_is_decode_error() {
    let server = common::start().await;
    let err = server
        .client()
        .get::<mythos_core::user::User>("/plain")
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::Decode { .. });

    // Text can still be read as a string.
    let text: String = server.client().get("/plain").await.unwrap();
    assert_eq!(text, "hello");
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let client = ApiClient::new(&ClientConfig::new("http://127.0.0.1:1/api/v1"));
    let err = client.users().get(1).await.unwrap_err();
    assert_matches!(err, ClientError::Network(_));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn default_headers_and_content_type_are_sent() {
    let server = common::start().await;
    let config = ClientConfig::new(format!("{}/", server.base_url)).with_header("x-trace", "t-1");
    let echoed: Value = ApiClient::new(&config).get("echo-headers").await.unwrap();
    assert_eq!(echoed["x_trace"], "t-1");
    assert_eq!(echoed["content_type"], "application/json");
}

#[tokio::test]
async fn absent_query_params_are_not_sent() {
    let server = common::start().await;
    let client = server.client();

    client.users().list(&UserListParams::default()).await.unwrap();
    assert_eq!(*server.mock.last_query.lock().unwrap(), None);

    let params = ProjectListParams {
        user_id: Some(1),
        ..Default::default()
    };
    client.projects().list(&params).await.unwrap();
    assert_eq!(
        server.mock.last_query.lock().unwrap().as_deref(),
        Some("user_id=1")
    );

    let params = ArticleListParams {
        project_id: Some(4),
        user_id: Some(2),
        ..Default::default()
    };
    client.articles().list(&params).await.unwrap();
    assert_eq!(
        server.mock.last_query.lock().unwrap().as_deref(),
        Some("project_id=4&user_id=2")
    );
}

#[tokio::test]
async fn article_payload_decodes_into_variant_body() {
    let server = common::start().await;
    let article = server.client().articles().get(10).await.unwrap();
    assert_eq!(article.article_type(), Some(ArticleType::Location));
    let settlement = article.body.settlement().unwrap();
    assert_eq!(settlement.population, Some(4200));
    assert_matches!(article.body, ArticleBody::Location(Some(_)));
    assert_eq!(article.content.summary.as_deref(), Some("A harbour town"));
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let server = common::start().await;
    server.client().articles().delete(10).await.unwrap();
    assert_eq!(server.mock.hits("articles.delete"), 1);
}

#[tokio::test]
async fn file_url_is_absolute() {
    let server = common::start().await;
    let client = server.client();
    assert_eq!(
        client.images().file_url(7),
        format!("{}/images/7/file", server.base_url)
    );
}
