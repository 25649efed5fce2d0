use super::request::ApiRequest;
use crate::error::ApiError;
use crate::session::{CredentialStore, Navigator};

use common::HttpStatusCode;

use std::sync::Arc;

use log::{debug, warn};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

/// A completed 2xx response, body fully read.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: HttpStatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    #[track_caller]
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Response-phase hook, run in chain order before the caller sees the result.
///
/// Handlers observe results; they never alter what the caller receives.
pub trait ResponseHandler: Send + Sync {
    fn on_success(&self, _request: &ApiRequest, _response: &ApiResponse) {}

    fn on_error(&self, request: &ApiRequest, error: &ApiError);
}

/// The global reaction to a 401: clear the session and go to the login page.
///
/// Every caller observes the same reaction, whichever endpoint answered 401.
pub struct SessionInvalidation {
    store: CredentialStore,
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl SessionInvalidation {
    pub fn new(
        store: CredentialStore,
        navigator: Arc<dyn Navigator>,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            navigator,
            login_path: login_path.into(),
        }
    }
}

impl ResponseHandler for SessionInvalidation {
    fn on_error(&self, request: &ApiRequest, error: &ApiError) {
        if !error.is_authorization_expired() {
            return;
        }

        warn!(
            "Session rejected by server on {} {}, signing out",
            request.method, request.path
        );
        self.store.clear_session();
        self.navigator.navigate(&self.login_path);
    }
}

/// Logs every failed call with its category.
pub struct ErrorLogger;

impl ResponseHandler for ErrorLogger {
    fn on_success(&self, request: &ApiRequest, response: &ApiResponse) {
        debug!(
            "{} {} -> {} ({} bytes)",
            request.method,
            request.path,
            response.status,
            response.body.len()
        );
    }

    fn on_error(&self, request: &ApiRequest, error: &ApiError) {
        match error.status_code() {
            Some(status) => warn!(
                "{} {} failed [{}] HTTP {}",
                request.method,
                request.path,
                error.error_category(),
                status
            ),
            None => warn!(
                "{} {} failed [{}]: {}",
                request.method,
                request.path,
                error.error_category(),
                error
            ),
        }
    }
}
