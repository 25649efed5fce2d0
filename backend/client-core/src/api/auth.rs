//! Sign-in and sign-out.
//!
//! Login stores the returned token and user through the credential store,
//! so the durable mirror and any route guard observe it like any other
//! session change.

use crate::error::CoreError;
use crate::http::{ApiClient, ApiRequest};
use crate::session::{CredentialStore, Navigator, Session, decode_claims};

use common::BearerToken;
use models::UserIdentity;

use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

pub const LOGIN_ENDPOINT: &str = "auth/login";

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserIdentity>,
}

pub struct AuthService {
    client: ApiClient,
    store: CredentialStore,
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl AuthService {
    pub fn new(
        client: ApiClient,
        store: CredentialStore,
        navigator: Arc<dyn Navigator>,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            client,
            store,
            navigator,
            login_path: login_path.into(),
        }
    }

    /// Exchange credentials for a session and install it.
    ///
    /// When the response carries no user, the identity is taken from the
    /// token's claims if they name one.
    ///
    /// # Errors
    ///
    /// [`CoreError::Api`] for rejected credentials or transport failures;
    /// [`CoreError::Session`] if the server returned a blank token.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, CoreError> {
        let request = ApiRequest::post(LOGIN_ENDPOINT).with_json(&LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        })?;

        let response: LoginResponse = self.client.send_json(request).await?;
        let user = response
            .user
            .or_else(|| decode_claims(&response.token).identity());

        let session = Session::new(BearerToken::new(response.token), user);
        self.store
            .set_session(session.token.clone(), session.user.clone())?;

        info!(
            "Signed in as {}",
            session.user.as_ref().map(|u| u.name.as_str()).unwrap_or(email)
        );
        Ok(session)
    }

    /// Clear the session and return to the login page.
    pub fn logout(&self) {
        self.store.clear_session();
        self.navigator.navigate(&self.login_path);
        info!("Signed out");
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}
