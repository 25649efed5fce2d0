//! Protected-route gating.
//!
//! "Token present" counts as authenticated. There is no client-side expiry
//! check: a client may believe itself signed in with an expired token until
//! the server answers 401, at which point the response pipeline clears the
//! session and this guard redirects.

use super::navigator::Navigator;
use super::store::CredentialStore;

use std::sync::Arc;

use log::{debug, info};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Which routes are gated and where unauthenticated users are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPolicy {
    pub login_path: String,
    pub protected_prefix: String,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            login_path: crate::LOGIN_PATH.to_string(),
            protected_prefix: crate::ADMIN_ROUTE_PREFIX.to_string(),
        }
    }
}

impl GuardPolicy {
    pub fn new(login_path: impl Into<String>, protected_prefix: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            protected_prefix: protected_prefix.into(),
        }
    }

    pub fn is_login(&self, route: &str) -> bool {
        strip_query(route) == strip_query(&self.login_path)
    }

    /// True for the prefix itself and anything below it, except the login path.
    pub fn is_protected(&self, route: &str) -> bool {
        !self.is_login(route) && self.is_under_prefix(route)
    }

    /// Segment-wise prefix match; `/administrator` is not under `/admin`.
    pub fn is_under_prefix(&self, route: &str) -> bool {
        let path = strip_query(route);
        match path.strip_prefix(strip_query(&self.protected_prefix)) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Outcome for a route once the session has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Protected route, session present: render.
    Authenticated,
    /// Protected route, no session: navigating to `target`.
    Redirecting { target: String },
    /// Public route or the login path itself: nothing to guard.
    Unguarded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Session presence not evaluated yet.
    Checking,
    Resolved(Resolution),
}

pub struct RouteGuard {
    store: CredentialStore,
    navigator: Arc<dyn Navigator>,
    policy: GuardPolicy,
}

impl RouteGuard {
    pub fn new(store: CredentialStore, navigator: Arc<dyn Navigator>, policy: GuardPolicy) -> Self {
        Self {
            store,
            navigator,
            policy,
        }
    }

    pub fn policy(&self) -> &GuardPolicy {
        &self.policy
    }

    /// Decide without side effects.
    pub fn resolve(&self, route: &str) -> Resolution {
        if !self.policy.is_protected(route) {
            return Resolution::Unguarded;
        }

        if self.store.is_authenticated() {
            Resolution::Authenticated
        } else {
            Resolution::Redirecting {
                target: self.policy.login_path.clone(),
            }
        }
    }

    /// Decide and, when redirecting, navigate to the login path.
    pub fn evaluate(&self, route: &str) -> Resolution {
        let resolution = self.resolve(route);

        if let Resolution::Redirecting { target } = &resolution {
            info!("No active session for {}, redirecting to {}", route, target);
            self.navigator.navigate(target);
        }

        resolution
    }

    /// Re-evaluate whenever the active route or the session changes.
    ///
    /// The returned receiver starts at [`GuardState::Checking`]. The task ends
    /// when the route channel closes or every state receiver is dropped.
    pub fn spawn_watch(
        self,
        mut routes: watch::Receiver<String>,
    ) -> (JoinHandle<()>, watch::Receiver<GuardState>) {
        let (state_tx, state_rx) = watch::channel(GuardState::Checking);
        let mut sessions = self.store.subscribe();

        let handle = tokio::spawn(async move {
            loop {
                let route = routes.borrow_and_update().clone();
                sessions.mark_unchanged();

                let state = GuardState::Resolved(self.evaluate(&route));
                debug!("Guard state for {}: {:?}", route, state);
                if state_tx.send(state).is_err() {
                    break;
                }

                tokio::select! {
                    changed = routes.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    changed = sessions.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = state_tx.closed() => break,
                }
            }

            debug!("Route guard watch stopped");
        });

        (handle, state_rx)
    }
}

fn strip_query(route: &str) -> &str {
    route
        .split(['?', '#'])
        .next()
        .unwrap_or(route)
        .trim_end_matches('/')
}
