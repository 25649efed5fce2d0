use super::request::{ApiRequest, RequestBody};
use crate::error::ApiError;
use crate::session::CredentialStore;

use common::BearerToken;

use log::trace;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Request-phase hook, run in chain order before dispatch.
pub trait RequestInterceptor: Send + Sync {
    fn name(&self) -> &'static str;

    fn intercept(&self, request: &mut ApiRequest) -> Result<(), ApiError>;
}

/// Attaches `Authorization: Bearer <token>` when a session token exists.
///
/// Reads the credential store first. Until the store has settled, the
/// durable mirror is consulted too, so a token persisted by an earlier run is
/// still sent before bootstrap. After a set or clear only memory counts.
pub struct BearerAuth {
    store: CredentialStore,
}

impl BearerAuth {
    pub fn new(store: CredentialStore) -> Self {
        Self { store }
    }

    fn current_token(&self) -> Option<BearerToken> {
        let token = match self.store.token() {
            Some(token) => Some(token),
            None if self.store.is_settled() => None,
            None => self.store.storage().primary_token().map(BearerToken::new),
        };
        token.filter(|token| !token.is_empty())
    }
}

impl RequestInterceptor for BearerAuth {
    fn name(&self) -> &'static str {
        "bearer_auth"
    }

    fn intercept(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        let Some(token) = self.current_token() else {
            trace!("No session token for {} {}", request.method, request.path);
            return Ok(());
        };

        let mut value = HeaderValue::from_str(&token.authorization_value())
            .map_err(|e| ApiError::request_build(format!("Invalid bearer token: {e}")))?;
        value.set_sensitive(true);
        request.headers.insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// Multipart bodies get no explicit content type so the transport can add
/// its boundary; everything else defaults to JSON.
pub struct ContentTypeNegotiation;

impl RequestInterceptor for ContentTypeNegotiation {
    fn name(&self) -> &'static str {
        "content_type"
    }

    fn intercept(&self, request: &mut ApiRequest) -> Result<(), ApiError> {
        match request.body {
            RequestBody::Multipart(_) => {
                if request.headers.remove(CONTENT_TYPE).is_some() {
                    trace!("Dropped explicit content type from multipart request");
                }
            }
            RequestBody::Json(_) | RequestBody::Empty => {
                if !request.headers.contains_key(CONTENT_TYPE) {
                    request
                        .headers
                        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
                }
            }
        }
        Ok(())
    }
}
