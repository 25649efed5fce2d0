//! The credential store.
//!
//! Holds at most one session per client context. State lives in a
//! `tokio::sync::watch` channel: the sender serializes every mutation, and
//! subscribers (the route guard) are woken on each change.
//!
//! Every mutation is mirrored to durable storage while the channel's write
//! lock is held, so the mirror never disagrees with the order of in-memory
//! updates. Mirror failures are logged and swallowed.

use crate::error::SessionError;
use crate::storage::{DurableStorage, KeyValueStorage, SESSION_SNAPSHOT_KEY, TOKEN_KEY};

use common::BearerToken;
use models::UserIdentity;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

const SNAPSHOT_VERSION: u32 = 0;

/// An active session: the bearer token plus whatever identity is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: BearerToken,
    pub user: Option<UserIdentity>,
}

impl Session {
    pub fn new(token: BearerToken, user: Option<UserIdentity>) -> Self {
        Self { token, user }
    }

    pub fn role(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.role.as_deref())
    }
}

/// The only ways the store is mutated.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Replace the current session.
    Set(Session),

    /// Drop the current session, if any.
    Clear,
}

/// Shape of the `auth-storage` snapshot in the primary store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PersistedSession {
    pub(crate) state: PersistedState,
    #[serde(default)]
    pub(crate) version: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct PersistedState {
    #[serde(default)]
    pub(crate) token: Option<String>,
    #[serde(default)]
    pub(crate) user: Option<UserIdentity>,
}

/// Process-wide credential state, passed explicitly to its consumers.
///
/// Clones share the same underlying state.
#[derive(Clone)]
pub struct CredentialStore {
    state: Arc<watch::Sender<Option<Session>>>,
    settled: Arc<AtomicBool>,
    storage: DurableStorage,
}

impl CredentialStore {
    /// Create an empty store mirrored to `storage`.
    pub fn new(storage: DurableStorage) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            state: Arc::new(state),
            settled: Arc::new(AtomicBool::new(false)),
            storage,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(DurableStorage::in_memory())
    }

    /// Replace the current token and identity atomically.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyToken`] for a blank token; the store is
    /// left unchanged.
    #[track_caller]
    pub fn set_session(
        &self,
        token: BearerToken,
        user: Option<UserIdentity>,
    ) -> Result<(), SessionError> {
        if token.is_empty() {
            return Err(SessionError::empty_token());
        }

        self.apply(SessionCommand::Set(Session::new(token, user)));
        Ok(())
    }

    /// Remove token and identity. Safe to call when already empty.
    pub fn clear_session(&self) {
        self.apply(SessionCommand::Clear);
    }

    pub fn get_session(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> Option<BearerToken> {
        self.state.borrow().as_ref().map(|s| s.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Whether a session has been set, populated or cleared in this process.
    ///
    /// Once settled, the in-memory state is authoritative and the durable
    /// mirror must not be consulted for a token.
    pub fn is_settled(&self) -> bool {
        self.settled.load(Ordering::Acquire)
    }

    /// Install `session` only if no session is active.
    ///
    /// The emptiness check and the write happen under the same lock. Returns
    /// whether the session was installed.
    pub fn populate_if_empty(&self, session: Session) -> bool {
        if session.token.is_empty() {
            warn!("Refusing to populate credential store with an empty token");
            return false;
        }

        let storage = &self.storage;
        let settled = &self.settled;
        self.state.send_if_modified(|current| {
            if current.is_some() {
                debug!("Credential store already populated, leaving session untouched");
                return false;
            }

            mirror_set(storage, &session);
            *current = Some(session);
            settled.store(true, Ordering::Release);
            true
        })
    }

    /// Apply a mutation command.
    pub fn apply(&self, command: SessionCommand) {
        let storage = &self.storage;
        let settled = &self.settled;
        self.state.send_if_modified(|current| {
            settled.store(true, Ordering::Release);
            match command {
                SessionCommand::Set(session) => {
                    if current.is_some() {
                        info!("Replacing active session");
                    } else {
                        info!("Session established");
                    }
                    mirror_set(storage, &session);
                    *current = Some(session);
                    true
                }
                SessionCommand::Clear => {
                    mirror_clear(storage);
                    if current.take().is_some() {
                        info!("Session cleared");
                        true
                    } else {
                        debug!("Clear requested but no session was active");
                        false
                    }
                }
            }
        });
    }

    /// Receiver woken on every session change.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }

    pub fn storage(&self) -> &DurableStorage {
        &self.storage
    }
}

/// The persisted session snapshot, if one is present and readable.
pub(crate) fn load_snapshot(storage: &DurableStorage) -> Option<PersistedState> {
    let raw = match storage.primary().get(SESSION_SNAPSHOT_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to read session snapshot: {}", e);
            return None;
        }
    };

    match serde_json::from_str::<PersistedSession>(&raw) {
        Ok(snapshot) => Some(snapshot.state),
        Err(e) => {
            warn!("Ignoring unreadable session snapshot: {}", e);
            None
        }
    }
}

fn mirror_set(storage: &DurableStorage, session: &Session) {
    let token = session.token.expose();

    persist(storage.primary(), TOKEN_KEY, Some(token));

    let snapshot = PersistedSession {
        state: PersistedState {
            token: Some(token.to_string()),
            user: session.user.clone(),
        },
        version: SNAPSHOT_VERSION,
    };
    match serde_json::to_string(&snapshot) {
        Ok(json) => persist(storage.primary(), SESSION_SNAPSHOT_KEY, Some(&json)),
        Err(e) => warn!("Failed to serialize session snapshot: {}", e),
    }

    persist(storage.cookies(), TOKEN_KEY, Some(token));
}

fn mirror_clear(storage: &DurableStorage) {
    persist(storage.primary(), TOKEN_KEY, None);
    persist(storage.primary(), SESSION_SNAPSHOT_KEY, None);
    persist(storage.cookies(), TOKEN_KEY, None);
}

fn persist(storage: &dyn KeyValueStorage, key: &str, value: Option<&str>) {
    let result = match value {
        Some(value) => storage.set(key, value),
        None => storage.remove(key),
    };

    if let Err(e) = result {
        warn!("Failed to mirror '{}' to durable storage: {}", key, e);
    }
}
