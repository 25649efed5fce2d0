use crate::helpers::{PROTECTED_ROUTE, test_client};

use client_core::error::ApiError;
use client_core::http::{ApiClient, ApiRequest, MultipartForm};
use client_core::session::{CredentialStore, Navigator, Router};
use client_core::storage::{SESSION_SNAPSHOT_KEY, TOKEN_KEY};

use common::BearerToken;

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, Request, ResponseTemplate};

// ============================================================================
// Request pipeline
// ============================================================================

/// **VALUE**: Every request carries the session's bearer token.
///
/// **WHY THIS MATTERS**: Protected endpoints reject anonymous calls with 401,
/// which would sign the user out.
///
/// **BUG THIS CATCHES**: Would catch the request chain not running before
/// dispatch.
#[tokio::test]
async fn given_session_when_request_sent_then_bearer_header_and_json_type() {
    // GIVEN: A signed-in client
    let t = test_client().await;
    t.store
        .set_session(BearerToken::new("tok-123"), None)
        .unwrap();
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .and(header("authorization", "Bearer tok-123"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "views": 10 })))
        .expect(1)
        .mount(&t.server)
        .await;

    // WHEN
    let body: serde_json::Value = t.client.send_json(ApiRequest::get("stats")).await.unwrap();

    // THEN
    assert_eq!(body["views"], 10);
}

#[tokio::test]
async fn given_json_body_when_sent_then_server_receives_it() {
    let t = test_client().await;
    Mock::given(method("POST"))
        .and(path("/api/categories"))
        .and(body_json(json!({ "name": "Politik" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&t.server)
        .await;

    let request = ApiRequest::post("/categories")
        .with_json(&json!({ "name": "Politik" }))
        .unwrap();
    let response = t.client.send(request).await.unwrap();

    assert_eq!(response.status.0, 201);
}

/// **VALUE**: Uploads go out as real multipart with a boundary.
///
/// **WHY THIS MATTERS**: A JSON content type on an upload makes the server
/// drop the file.
///
/// **BUG THIS CATCHES**: Would catch the JSON default leaking onto forms.
#[tokio::test]
async fn given_multipart_form_when_sent_then_content_type_is_multipart() {
    let t = test_client().await;
    Mock::given(method("POST"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&t.server)
        .await;

    let form = MultipartForm::new()
        .text("title", "Banjir Jakarta")
        .file("image", "cover.png", Some("image/png"), vec![0x89, 0x50]);
    t.client
        .send(ApiRequest::post("articles").with_multipart(form))
        .await
        .unwrap();

    let received = t.server.received_requests().await.unwrap();
    let content_type = received[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    assert!(!content_type.contains("application/json"));
}

#[tokio::test]
async fn given_query_pairs_when_sent_then_appear_in_url() {
    let t = test_client().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&t.server)
        .await;

    let request = ApiRequest::get("search")
        .with_query(&json!({ "q": "banjir", "page": 2, "skip": null }))
        .unwrap();
    t.client.send(request).await.unwrap();

    let received: Vec<Request> = t.server.received_requests().await.unwrap();
    let query = received[0].url.query().unwrap_or_default().to_string();
    assert!(query.contains("q=banjir"));
    assert!(query.contains("page=2"));
    assert!(!query.contains("skip"));
}

// ============================================================================
// Response pipeline
// ============================================================================

/// **VALUE**: A 401 from any endpoint signs the user out everywhere.
///
/// **WHY THIS MATTERS**: An expired token must not leave the console showing
/// protected pages that can no longer load.
///
/// **BUG THIS CATCHES**: Would catch the store being cleared without the
/// durable mirror, which would restore the dead token on restart.
#[tokio::test]
async fn given_401_when_request_sent_then_session_cleared_and_navigated_to_login() {
    // GIVEN: A signed-in client on a protected route
    let t = test_client().await;
    t.store
        .set_session(BearerToken::new("expired"), None)
        .unwrap();
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(401).set_body_string("jwt expired"))
        .mount(&t.server)
        .await;

    // WHEN
    let result = t.client.send(ApiRequest::get("articles")).await;

    // THEN: The caller still sees the error
    match result {
        Err(ApiError::AuthorizationExpired {
            status_code,
            message,
            ..
        }) => {
            assert_eq!(status_code.0, 401);
            assert_eq!(message, "jwt expired");
        }
        other => panic!("Expected AuthorizationExpired, got {other:?}"),
    }

    // THEN: Memory and durable storage are empty, and we are on the login page
    assert!(!t.store.is_authenticated());
    let storage = t.store.storage();
    assert_eq!(storage.primary().get(TOKEN_KEY).unwrap(), None);
    assert_eq!(storage.primary().get(SESSION_SNAPSHOT_KEY).unwrap(), None);
    assert_eq!(storage.cookies().get(TOKEN_KEY).unwrap(), None);
    assert_eq!(t.router.current_route(), "/admin/login");
    assert_eq!(t.router.history(), vec!["/admin/login".to_string()]);
}

/// **VALUE**: Non-401 failures reach the caller with no global side effect.
///
/// **BUG THIS CATCHES**: Would catch a 404 or 500 signing the user out.
#[tokio::test]
async fn given_404_and_500_when_request_sent_then_session_untouched() {
    let t = test_client().await;
    t.store.set_session(BearerToken::new("ok"), None).unwrap();
    Mock::given(path("/api/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&t.server)
        .await;
    Mock::given(path("/api/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&t.server)
        .await;

    let missing = t.client.send(ApiRequest::get("missing")).await.unwrap_err();
    let broken = t.client.send(ApiRequest::get("broken")).await.unwrap_err();

    assert!(matches!(missing, ApiError::ClientError { .. }));
    assert_eq!(missing.status_code(), Some(404));
    assert!(matches!(broken, ApiError::ServerError { .. }));
    assert!(t.store.is_authenticated());
    assert_eq!(t.router.current_route(), PROTECTED_ROUTE);
    assert!(t.router.history().is_empty());
}

#[tokio::test]
async fn given_unreachable_server_when_request_sent_then_network_failure() {
    // Port 9 (discard) on localhost is closed on test machines.
    let store = CredentialStore::in_memory();
    store.set_session(BearerToken::new("ok"), None).unwrap();
    let router = Router::new(PROTECTED_ROUTE);
    let client = ApiClient::builder("http://127.0.0.1:9/api/")
        .timeout(Duration::from_secs(2))
        .with_session(store.clone(), Arc::new(router.clone()), "/admin/login")
        .build()
        .unwrap();

    let error = client.send(ApiRequest::get("articles")).await.unwrap_err();

    assert!(matches!(error, ApiError::NetworkFailure { .. }));
    assert!(store.is_authenticated());
}

#[tokio::test]
async fn given_malformed_json_when_send_json_then_json_error() {
    let t = test_client().await;
    Mock::given(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&t.server)
        .await;

    let result: Result<serde_json::Value, ApiError> =
        t.client.send_json(ApiRequest::get("stats")).await;

    assert_eq!(result.unwrap_err().error_category(), "json");
}

#[test]
fn given_invalid_base_url_when_building_client_then_url_parse_error() {
    let result = ApiClient::new(
        "not a url",
        CredentialStore::in_memory(),
        Arc::new(Router::new("/")),
    );

    assert!(matches!(result, Err(ApiError::UrlParse { .. })));
}

#[test]
fn given_base_url_without_trailing_slash_when_built_then_slash_added() {
    let client = ApiClient::builder("http://localhost:5000/api").build().unwrap();

    assert_eq!(client.base_url().as_str(), "http://localhost:5000/api/");
}
