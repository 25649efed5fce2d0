use crate::session::{
    CredentialStore, GuardPolicy, GuardState, Navigator, Resolution, RouteGuard, Router,
};

use common::BearerToken;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

fn guard(store: &CredentialStore, router: &Router) -> RouteGuard {
    RouteGuard::new(
        store.clone(),
        Arc::new(router.clone()),
        GuardPolicy::default(),
    )
}

async fn wait_for(rx: &mut watch::Receiver<GuardState>, expected: GuardState) {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if *rx.borrow_and_update() == expected {
                return;
            }
            rx.changed().await.unwrap();
        }
    })
    .await
    .unwrap_or_else(|_| panic!("guard never reached {expected:?}"));
}

#[test]
fn given_default_policy_when_classifying_routes_then_prefix_matches_segments() {
    let policy = GuardPolicy::default();

    assert!(policy.is_protected("/admin"));
    assert!(policy.is_protected("/admin/"));
    assert!(policy.is_protected("/admin/dashboard"));
    assert!(policy.is_protected("/admin/articles?page=2"));
    assert!(!policy.is_protected("/administrator"));
    assert!(!policy.is_protected("/berita"));
    assert!(!policy.is_protected("/admin/login"));
    assert!(policy.is_login("/admin/login/"));
    assert!(policy.is_login("/admin/login?next=%2Fadmin"));
}

/// **VALUE**: The login route is never redirected, signed in or not.
///
/// **WHY THIS MATTERS**: Redirecting the login page to itself loops forever.
///
/// **BUG THIS CATCHES**: Would catch the login path being treated as an
/// ordinary protected route.
#[test]
fn given_login_route_when_evaluated_then_never_redirects() {
    let store = CredentialStore::in_memory();
    let router = Router::new("/admin/login");
    let guard = guard(&store, &router);

    let signed_out = guard.evaluate("/admin/login");
    store.set_session(BearerToken::new("t"), None).unwrap();
    let signed_in = guard.evaluate("/admin/login");

    assert_eq!(signed_out, Resolution::Unguarded);
    assert_eq!(signed_in, Resolution::Unguarded);
    assert!(router.history().is_empty());
}

/// **VALUE**: A signed-out visit to the dashboard lands on the login page.
///
/// **BUG THIS CATCHES**: Would catch the guard deciding to redirect but never
/// navigating.
#[test]
fn given_no_session_when_visiting_dashboard_then_redirects_to_login() {
    let store = CredentialStore::in_memory();
    let router = Router::new("/admin/dashboard");
    let guard = guard(&store, &router);

    let state = guard.evaluate("/admin/dashboard");

    assert_eq!(
        state,
        Resolution::Redirecting {
            target: "/admin/login".to_string()
        }
    );
    assert_eq!(router.current_route(), "/admin/login");
    assert_eq!(router.history(), vec!["/admin/login".to_string()]);
}

#[test]
fn given_session_when_visiting_dashboard_then_authenticated() {
    let store = CredentialStore::in_memory();
    store.set_session(BearerToken::new("t"), None).unwrap();
    let router = Router::new("/admin/dashboard");

    let state = guard(&store, &router).evaluate("/admin/dashboard");

    assert_eq!(state, Resolution::Authenticated);
    assert!(router.history().is_empty());
}

#[test]
fn given_public_route_when_resolved_then_unguarded() {
    let store = CredentialStore::in_memory();
    let router = Router::new("/berita");

    assert_eq!(guard(&store, &router).resolve("/berita"), Resolution::Unguarded);
}

/// **VALUE**: A watching guard reacts to the session being cleared while the
/// user sits on a protected page.
///
/// **WHY THIS MATTERS**: This is how a 401 elsewhere in the app moves the
/// user back to the login page.
///
/// **BUG THIS CATCHES**: Would catch the watch loop ignoring session changes.
#[tokio::test]
async fn given_watching_guard_when_session_cleared_then_redirects() {
    // GIVEN: Signed in on the dashboard, guard watching
    let store = CredentialStore::in_memory();
    store.set_session(BearerToken::new("t"), None).unwrap();
    let router = Router::new("/admin/dashboard");
    let (handle, mut state) = guard(&store, &router).spawn_watch(router.subscribe());
    wait_for(&mut state, GuardState::Resolved(Resolution::Authenticated)).await;

    // WHEN: The session is cleared
    store.clear_session();

    // THEN: The guard navigates to login, then settles there unguarded
    wait_for(&mut state, GuardState::Resolved(Resolution::Unguarded)).await;
    assert_eq!(router.current_route(), "/admin/login");

    drop(state);
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn given_watching_guard_when_route_changes_then_reevaluates() {
    let store = CredentialStore::in_memory();
    store.set_session(BearerToken::new("t"), None).unwrap();
    let router = Router::new("/berita");
    let (_handle, mut state) = guard(&store, &router).spawn_watch(router.subscribe());
    wait_for(&mut state, GuardState::Resolved(Resolution::Unguarded)).await;

    router.navigate("/admin/dashboard");

    wait_for(&mut state, GuardState::Resolved(Resolution::Authenticated)).await;
}
