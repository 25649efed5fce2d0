//! Shared fixtures: a client wired to a mock server with the standard chains.

use client_core::http::ApiClient;
use client_core::session::{CredentialStore, Router};

use std::sync::Arc;

use wiremock::MockServer;

pub const PROTECTED_ROUTE: &str = "/admin/dashboard";

pub struct TestClient {
    pub server: MockServer,
    pub store: CredentialStore,
    pub router: Router,
    pub client: ApiClient,
}

/// Start a mock server and a client pointed at its `/api/` path.
pub async fn test_client() -> TestClient {
    let server = MockServer::start().await;
    let store = CredentialStore::in_memory();
    let router = Router::new(PROTECTED_ROUTE);
    let client = ApiClient::new(
        &format!("{}/api", server.uri()),
        store.clone(),
        Arc::new(router.clone()),
    )
    .expect("Failed to build client");

    TestClient {
        server,
        store,
        router,
        client,
    }
}
