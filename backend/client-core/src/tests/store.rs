use crate::error::SessionError;
use crate::session::{CredentialStore, Session, SessionCommand};
use crate::storage::{DurableStorage, SESSION_SNAPSHOT_KEY, TOKEN_KEY};
use crate::tests::FailingStorage;

use common::BearerToken;
use models::UserIdentity;

use std::sync::Arc;

fn editor() -> UserIdentity {
    UserIdentity::new("7", "Rina").with_role("editor")
}

/// **VALUE**: Setting a session is visible in memory and in every durable key.
///
/// **WHY THIS MATTERS**: Bootstrap on the next start reads only the durable
/// copies; a missed key signs the user out on restart.
///
/// **BUG THIS CATCHES**: Would catch if the cookie mirror or the snapshot
/// were skipped on set.
#[test]
fn given_new_session_when_set_then_memory_and_durable_storage_reflect_it() {
    // GIVEN: An empty store
    let store = CredentialStore::in_memory();

    // WHEN: Setting a session
    store
        .set_session(BearerToken::new("tok-1"), Some(editor()))
        .unwrap();

    // THEN: Memory holds it
    let session = store.get_session().unwrap();
    assert_eq!(session.token.expose(), "tok-1");
    assert_eq!(session.user, Some(editor()));
    assert_eq!(session.role(), Some("editor"));

    // THEN: Both durable stores hold the token, and the snapshot carries the user
    let storage = store.storage();
    assert_eq!(
        storage.primary().get(TOKEN_KEY).unwrap().as_deref(),
        Some("tok-1")
    );
    assert_eq!(
        storage.cookies().get(TOKEN_KEY).unwrap().as_deref(),
        Some("tok-1")
    );
    let snapshot: serde_json::Value = serde_json::from_str(
        &storage.primary().get(SESSION_SNAPSHOT_KEY).unwrap().unwrap(),
    )
    .unwrap();
    assert_eq!(snapshot["state"]["token"], "tok-1");
    assert_eq!(snapshot["state"]["user"]["name"], "Rina");
    assert_eq!(snapshot["version"], 0);
}

#[test]
fn given_existing_session_when_set_again_then_replaced() {
    let store = CredentialStore::in_memory();
    store.set_session(BearerToken::new("old"), None).unwrap();

    store
        .set_session(BearerToken::new("new"), Some(editor()))
        .unwrap();

    assert_eq!(store.token().unwrap().expose(), "new");
    assert_eq!(
        store.storage().primary_token().as_deref(),
        Some("new")
    );
}

/// **VALUE**: A blank token is refused and the store is left as it was.
///
/// **BUG THIS CATCHES**: Would catch if "" were stored, which would make the
/// guard treat the user as signed in with nothing to send.
#[test]
fn given_blank_token_when_set_then_rejected_and_store_unchanged() {
    let store = CredentialStore::in_memory();
    store.set_session(BearerToken::new("keep"), None).unwrap();

    let result = store.set_session(BearerToken::new("   "), Some(editor()));

    assert!(matches!(result, Err(SessionError::EmptyToken { .. })));
    assert_eq!(store.token().unwrap().expose(), "keep");
}

/// **VALUE**: Clearing twice leaves the same state as clearing once.
///
/// **WHY THIS MATTERS**: Logout and the 401 handler can both clear within
/// the same moment.
///
/// **BUG THIS CATCHES**: Would catch a second clear panicking or resurrecting
/// durable keys.
#[test]
fn given_session_when_cleared_twice_then_same_as_once() {
    // GIVEN: An active session
    let store = CredentialStore::in_memory();
    store
        .set_session(BearerToken::new("tok"), Some(editor()))
        .unwrap();

    // WHEN: Clearing once
    store.clear_session();
    let after_once = (
        store.get_session(),
        store.storage().primary().get(TOKEN_KEY).unwrap(),
        store.storage().primary().get(SESSION_SNAPSHOT_KEY).unwrap(),
        store.storage().cookies().get(TOKEN_KEY).unwrap(),
    );

    // WHEN: Clearing again
    store.clear_session();
    let after_twice = (
        store.get_session(),
        store.storage().primary().get(TOKEN_KEY).unwrap(),
        store.storage().primary().get(SESSION_SNAPSHOT_KEY).unwrap(),
        store.storage().cookies().get(TOKEN_KEY).unwrap(),
    );

    // THEN: Identical, and empty
    assert_eq!(after_once, after_twice);
    assert_eq!(after_twice, (None, None, None, None));
}

#[test]
fn given_empty_store_with_stray_durable_token_when_cleared_then_token_removed() {
    let store = CredentialStore::in_memory();
    store.storage().cookies().set(TOKEN_KEY, "stray").unwrap();

    store.clear_session();

    assert_eq!(store.storage().cookies().get(TOKEN_KEY).unwrap(), None);
}

/// **VALUE**: Storage failures never surface to callers of the store.
///
/// **WHY THIS MATTERS**: A read-only disk must not break signing in for the
/// current run.
///
/// **BUG THIS CATCHES**: Would catch a mirror error propagating or panicking.
#[test]
fn given_failing_storage_when_set_and_clear_then_memory_state_still_updates() {
    let store = CredentialStore::new(DurableStorage::new(
        Arc::new(FailingStorage),
        Arc::new(FailingStorage),
    ));

    store.set_session(BearerToken::new("tok"), None).unwrap();
    assert!(store.is_authenticated());

    store.clear_session();
    assert!(!store.is_authenticated());
}

/// **VALUE**: A store counts as settled once anything has written to it.
///
/// **BUG THIS CATCHES**: Would catch a clear on an empty store leaving the
/// store unsettled, which lets a stale durable token back into requests.
#[test]
fn given_fresh_store_when_cleared_then_settled() {
    let store = CredentialStore::in_memory();
    assert!(!store.is_settled());

    store.clear_session();

    assert!(store.is_settled());
    assert!(!store.is_authenticated());
}

#[test]
fn given_active_session_when_populate_if_empty_then_untouched() {
    let store = CredentialStore::in_memory();
    store.set_session(BearerToken::new("active"), None).unwrap();

    let installed = store.populate_if_empty(Session::new(BearerToken::new("other"), None));

    assert!(!installed);
    assert_eq!(store.token().unwrap().expose(), "active");
}

#[test]
fn given_empty_store_when_populate_if_empty_then_installed() {
    let store = CredentialStore::in_memory();

    let installed = store.populate_if_empty(Session::new(BearerToken::new("restored"), None));

    assert!(installed);
    assert_eq!(store.token().unwrap().expose(), "restored");
}

/// **VALUE**: Subscribers are woken by session changes.
///
/// **BUG THIS CATCHES**: Would catch mutations that bypass the channel, which
/// would leave the route guard showing a stale decision.
#[tokio::test]
async fn given_subscriber_when_session_changes_then_notified() {
    let store = CredentialStore::in_memory();
    let mut rx = store.subscribe();

    store.apply(SessionCommand::Set(Session::new(BearerToken::new("t"), None)));
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_some());

    store.apply(SessionCommand::Clear);
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_none());
}

#[test]
fn given_clones_when_one_sets_then_other_observes() {
    let store = CredentialStore::in_memory();
    let clone = store.clone();

    store.set_session(BearerToken::new("shared"), None).unwrap();

    assert_eq!(clone.token().unwrap().expose(), "shared");
}
