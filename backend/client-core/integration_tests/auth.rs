use crate::helpers::test_client;

use client_core::LOGIN_PATH;
use client_core::api::AuthService;
use client_core::error::{ApiError, CoreError};
use client_core::session::{Navigator, SessionBootstrap};
use client_core::storage::TOKEN_KEY;

use models::UserIdentity;

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

/// **VALUE**: A successful login installs the session and persists it.
///
/// **WHY THIS MATTERS**: Login is the only way a session is created.
///
/// **BUG THIS CATCHES**: Would catch a login that works for the current run
/// but leaves nothing for bootstrap on the next start.
#[tokio::test]
async fn given_valid_credentials_when_login_then_session_stored_and_persisted() {
    // GIVEN
    let t = test_client().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "dewi@example.com", "password": "rahasia" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-login",
            "user": { "id": "1", "name": "Dewi", "email": "dewi@example.com", "role": "admin" }
        })))
        .expect(1)
        .mount(&t.server)
        .await;
    let auth = AuthService::new(
        t.client.clone(),
        t.store.clone(),
        Arc::new(t.router.clone()),
        LOGIN_PATH,
    );

    // WHEN
    let session = auth.login(" dewi@example.com ", "rahasia").await.unwrap();

    // THEN
    assert_eq!(session.token.expose(), "tok-login");
    assert_eq!(session.role(), Some("admin"));
    assert_eq!(t.store.get_session(), Some(session));
    assert_eq!(
        t.store.storage().cookies().get(TOKEN_KEY).unwrap().as_deref(),
        Some("tok-login")
    );
}

/// **VALUE**: Rejected credentials leave the client signed out on the login
/// page.
///
/// **BUG THIS CATCHES**: Would catch a failed login leaving a previous
/// session half in place.
#[tokio::test]
async fn given_rejected_credentials_when_login_then_authorization_error() {
    let t = test_client().await;
    Mock::given(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
        .mount(&t.server)
        .await;
    let auth = AuthService::new(
        t.client.clone(),
        t.store.clone(),
        Arc::new(t.router.clone()),
        LOGIN_PATH,
    );

    let result = auth.login("dewi@example.com", "salah").await;

    assert!(matches!(
        result,
        Err(CoreError::Api(ApiError::AuthorizationExpired { .. }))
    ));
    assert!(!t.store.is_authenticated());
    assert_eq!(t.router.current_route(), LOGIN_PATH);
}

#[tokio::test]
async fn given_blank_token_in_response_when_login_then_session_error() {
    let t = test_client().await;
    Mock::given(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "" })))
        .mount(&t.server)
        .await;
    let auth = AuthService::new(
        t.client.clone(),
        t.store.clone(),
        Arc::new(t.router.clone()),
        LOGIN_PATH,
    );

    let result = auth.login("dewi@example.com", "rahasia").await;

    assert!(matches!(result, Err(CoreError::Session(_))));
    assert!(!t.store.is_authenticated());
}

/// **VALUE**: After logout, a restart finds nothing to restore.
///
/// **BUG THIS CATCHES**: Would catch logout clearing memory but not storage.
#[tokio::test]
async fn given_session_when_logout_then_bootstrap_restores_nothing() {
    let t = test_client().await;
    t.store
        .set_session(
            common::BearerToken::new("tok"),
            Some(UserIdentity::new("1", "Dewi")),
        )
        .unwrap();
    let auth = AuthService::new(
        t.client.clone(),
        t.store.clone(),
        Arc::new(t.router.clone()),
        LOGIN_PATH,
    );

    auth.logout();
    let outcome = SessionBootstrap::new(t.store.clone()).run();

    assert!(!outcome.populated);
    assert!(!t.store.is_authenticated());
    assert_eq!(t.router.current_route(), LOGIN_PATH);
}
