//! Handler tests for marketplace-cli against a mock backend

use marketplace_cli::cli::commands::ProductFilters;
use marketplace_cli::cli::handlers;
use marketplace_cli::config::{CliConfig, OutputConfig};
use marketplace_cli::CliError;
use marketplace_sdk::ClientConfig;
use serde_json::json;
use std::path::Path;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, dir: &Path) -> CliConfig {
    CliConfig {
        api: ClientConfig {
            api_url: Some(server.uri()),
            session_file: Some(dir.join("session.json")),
            ..Default::default()
        },
        output: OutputConfig::default(),
    }
}

#[tokio::test]
async fn test_login_session_is_reused_by_next_invocation() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server, dir.path());

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "vera@example.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "stored-token",
            "user": { "id": "u-1", "email": "vera@example.com", "role": "customer" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .and(header("authorization", "Bearer stored-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = config.client().await.unwrap();
    handlers::auth::handle_login(
        &client,
        Some("vera@example.com".into()),
        Some("pw".into()),
        true,
    )
    .await
    .unwrap();
    assert!(dir.path().join("session.json").exists());

    // A fresh client stands in for the next CLI run
    let next = config.client().await.unwrap();
    assert_eq!(next.session().access_token().as_deref(), Some("stored-token"));
    handlers::shopping::handle_orders(&next, true).await.unwrap();
}

#[tokio::test]
async fn test_products_passes_filters() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("search", "lamp"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "id": "p-1", "name": "Desk lamp", "price": 24.5 }],
            "total": 1,
            "page": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = config_for(&server, dir.path()).client().await.unwrap();
    let filters = ProductFilters {
        search: Some("lamp".into()),
        page: Some(2),
        ..Default::default()
    };
    handlers::catalog::handle_products(&client, filters, false)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_raw_request_without_auth() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/favorites"))
        .and(body_json(json!({ "productId": "p-1" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "productId": "p-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = config_for(&server, dir.path()).client().await.unwrap();
    handlers::request::handle_request(
        &client,
        "post",
        "api/favorites",
        Some(r#"{"productId":"p-1"}"#),
        true,
    )
    .await
    .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_backend_error_is_api_error() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/api/orders/o-404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Order not found" })),
        )
        .mount(&server)
        .await;

    let client = config_for(&server, dir.path()).client().await.unwrap();
    let err = handlers::shopping::handle_order(&client, "o-404", false)
        .await
        .unwrap_err();

    match err {
        CliError::Api(api) => {
            assert_eq!(api.status, 404);
            assert_eq!(api.message, "Order not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_logout_without_session_skips_backend() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = config_for(&server, dir.path()).client().await.unwrap();
    handlers::auth::handle_logout(&client).await.unwrap();
}
