use newsdesk::cli::{ArticlesArgs, Command, LoginArgs};
use newsdesk::commands::{dispatch, session, visit};
use newsdesk::error::ConsoleError;
use newsdesk::state::AppState;

use client_core::config::ClientConfig;
use client_core::storage::StoragePaths;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// End-to-end console flows against a mock news API
// ============================================================================

async fn console_state(server: &MockServer, data_dir: &TempDir) -> AppState {
    let config = ClientConfig {
        api_base_url: format!("{}/api/", server.uri()),
        ..ClientConfig::default()
    };
    config.save(data_dir.path()).unwrap();

    AppState::initialize(StoragePaths::in_dir(data_dir.path())).unwrap()
}

async fn mount_login(server: &MockServer, role: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-console",
            "user": { "id": "1", "name": "Dewi", "email": "dewi@example.com", "role": role }
        })))
        .mount(server)
        .await;
}

fn login_args() -> LoginArgs {
    LoginArgs {
        email: "dewi@example.com".to_string(),
        password: "rahasia".to_string(),
    }
}

/// **VALUE**: A login survives a restart of the console.
///
/// **WHY THIS MATTERS**: Each console invocation is a new process; without the
/// durable mirror and bootstrap, every command would need a fresh login.
///
/// **BUG THIS CATCHES**: Would catch the session being written somewhere
/// bootstrap does not read.
#[tokio::test]
async fn given_login_when_console_restarted_then_session_restored() {
    // GIVEN: A login in one process
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    mount_login(&server, "admin").await;
    let first = console_state(&server, &data_dir).await;
    session::login(&first, &login_args()).await.unwrap();

    // WHEN: A new process starts on the same data directory
    let second = AppState::initialize(StoragePaths::in_dir(data_dir.path())).unwrap();

    // THEN: The session is back, with the user from the snapshot
    assert!(second.bootstrap.populated);
    let who = session::whoami(&second);
    assert!(who.signed_in);
    assert_eq!(who.name.as_deref(), Some("Dewi"));
    assert_eq!(who.role.as_deref(), Some("admin"));
}

/// **VALUE**: The admin menu follows the role after the guard lets the
/// user in.
///
/// **BUG THIS CATCHES**: Would catch editors being shown user management.
#[tokio::test]
async fn given_editor_when_visiting_dashboard_then_authenticated_without_user_management() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    mount_login(&server, "editor").await;
    let state = console_state(&server, &data_dir).await;
    session::login(&state, &login_args()).await.unwrap();

    let report = visit::visit(&state, "/admin/dashboard");

    assert_eq!(report.outcome, "authenticated");
    assert_eq!(report.landed_on, "/admin/dashboard");
    assert_eq!(report.menu, vec!["Dashboard".to_string()]);
    assert_eq!(report.user_label.as_deref(), Some("Dewi (editor)"));
}

#[tokio::test]
async fn given_admin_when_visiting_dashboard_then_user_management_listed() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    mount_login(&server, "admin").await;
    let state = console_state(&server, &data_dir).await;
    session::login(&state, &login_args()).await.unwrap();

    let report = visit::visit(&state, "/admin/dashboard");

    assert_eq!(
        report.menu,
        vec!["Dashboard".to_string(), "User Management".to_string()]
    );
}

#[tokio::test]
async fn given_signed_out_when_visiting_dashboard_then_redirected_to_login() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    let state = console_state(&server, &data_dir).await;

    let report = visit::visit(&state, "/admin/dashboard");

    assert_eq!(report.outcome, "redirecting");
    assert_eq!(report.landed_on, "/admin/login");
    assert!(report.menu.is_empty());
}

/// **VALUE**: A 401 during a command signs the console out for good.
///
/// **WHY THIS MATTERS**: The next invocation must not restore the rejected
/// token from disk.
///
/// **BUG THIS CATCHES**: Would catch the 401 handler clearing memory only.
#[tokio::test]
async fn given_expired_session_when_listing_articles_then_signed_out_on_disk() {
    // GIVEN: A signed-in console whose token the server now rejects
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    mount_login(&server, "admin").await;
    Mock::given(path("/api/articles"))
        .respond_with(ResponseTemplate::new(401).set_body_string("jwt expired"))
        .mount(&server)
        .await;
    let state = console_state(&server, &data_dir).await;
    session::login(&state, &login_args()).await.unwrap();

    // WHEN
    let result = dispatch(
        &state,
        Command::Articles(ArticlesArgs {
            page: 1,
            ..ArticlesArgs::default()
        }),
        false,
    )
    .await;

    // THEN
    assert!(matches!(result, Err(ConsoleError::SessionExpired { .. })));
    let restarted = AppState::initialize(StoragePaths::in_dir(data_dir.path())).unwrap();
    assert!(!restarted.bootstrap.populated);
    assert!(!session::whoami(&restarted).signed_in);
}

#[tokio::test]
async fn given_articles_when_listed_as_json_then_rendered() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/api/articles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "1",
                "title": "Banjir Jakarta",
                "slug": "banjir-jakarta",
                "content": "Hujan deras mengguyur ibu kota sejak pagi.",
                "createdAt": "2025-03-01"
            }],
            "totalPages": 2
        })))
        .mount(&server)
        .await;
    let state = console_state(&server, &data_dir).await;

    let output = dispatch(
        &state,
        Command::Articles(ArticlesArgs {
            page: 1,
            ..ArticlesArgs::default()
        }),
        true,
    )
    .await
    .unwrap();

    let rendered: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(rendered["total_pages"], 2);
    assert_eq!(rendered["articles"][0]["title"], "Banjir Jakarta");
}

#[tokio::test]
async fn given_session_when_logout_then_whoami_reports_signed_out() {
    let server = MockServer::start().await;
    let data_dir = TempDir::new().unwrap();
    mount_login(&server, "admin").await;
    let state = console_state(&server, &data_dir).await;
    session::login(&state, &login_args()).await.unwrap();

    let output = dispatch(&state, Command::Logout, false).await.unwrap();

    assert_eq!(output, "Signed out; now at /admin/login");
    assert_eq!(
        dispatch(&state, Command::Whoami, false).await.unwrap(),
        "Not signed in"
    );
}
