//! Startup reconciliation of persisted credentials into the credential store.
//!
//! 1. Read the token from the primary store, falling back to the cookie store.
//! 2. If the credential store is empty, populate it with that token. The
//!    identity comes from the persisted snapshot when its token matches,
//!    otherwise from the token's claims.
//! 3. Decode the active token's role claim. Decode failures are logged and
//!    degrade to "no role".
//!
//! Running it again while a session is active changes nothing.

use super::claims::{TokenClaims, decode_claims};
use super::store::{CredentialStore, Session, load_snapshot};
use crate::storage::TokenSource;

use common::BearerToken;

use log::{debug, info, warn};

/// What a bootstrap run found and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOutcome {
    /// Where a persisted token was found, if anywhere.
    pub source: Option<TokenSource>,
    /// Role claim of the active token.
    pub role: Option<String>,
    /// Whether this run installed the session.
    pub populated: bool,
}

pub struct SessionBootstrap {
    store: CredentialStore,
}

impl SessionBootstrap {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    pub fn run(&self) -> BootstrapOutcome {
        let found = self.store.storage().read_token();

        let mut populated = false;
        if let Some((token, source)) = &found {
            debug!("Found persisted token in {}", *source);
            populated = self.populate(token);
        } else {
            debug!("No persisted token found");
        }

        let role = self
            .store
            .token()
            .map(|t| t.expose().to_string())
            .or_else(|| found.as_ref().map(|(token, _)| token.clone()))
            .and_then(|token| decode_role(&token));

        BootstrapOutcome {
            source: found.map(|(_, source)| source),
            role,
            populated,
        }
    }

    fn populate(&self, token: &str) -> bool {
        if self.store.is_authenticated() {
            return false;
        }

        let user = load_snapshot(self.store.storage())
            .filter(|snapshot| snapshot.token.as_deref() == Some(token))
            .and_then(|snapshot| snapshot.user)
            .or_else(|| decode_claims(token).identity());

        let populated = self
            .store
            .populate_if_empty(Session::new(BearerToken::new(token), user));
        if populated {
            info!("Session restored from durable storage");
        }
        populated
    }
}

fn decode_role(token: &str) -> Option<String> {
    match decode_claims(token) {
        TokenClaims::Malformed { reason } => {
            warn!("Error decoding token: {}", reason);
            None
        }
        claims => claims.role().map(str::to_string),
    }
}
