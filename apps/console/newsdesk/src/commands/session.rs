use super::Report;
use crate::cli::LoginArgs;
use crate::error::ConsoleError;
use crate::state::AppState;

use client_core::session::{Navigator, decode_claims};

use log::debug;
use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WhoAmI {
    pub signed_in: bool,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

impl Report for WhoAmI {
    fn text(&self) -> String {
        if !self.signed_in {
            return "Not signed in".to_string();
        }

        let mut line = format!(
            "Signed in as {}",
            self.name.as_deref().unwrap_or("unknown user")
        );
        if let Some(email) = &self.email {
            line.push_str(&format!(" <{email}>"));
        }
        if let Some(role) = &self.role {
            line.push_str(&format!(" ({role})"));
        }
        line
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LoggedOut {
    pub redirected_to: String,
}

impl Report for LoggedOut {
    fn text(&self) -> String {
        format!("Signed out; now at {}", self.redirected_to)
    }
}

/// The role shown to the user: the token's claim, else the stored identity's.
pub fn active_role(state: &AppState) -> Option<String> {
    let session = state.store.get_session()?;
    decode_claims(session.token.expose())
        .role()
        .map(str::to_string)
        .or_else(|| session.role().map(str::to_string))
}

pub async fn login(state: &AppState, args: &LoginArgs) -> Result<WhoAmI, ConsoleError> {
    if args.email.trim().is_empty() || args.password.is_empty() {
        return Err(ConsoleError::invalid_argument(
            "Email and password are required",
        ));
    }

    state.auth().login(&args.email, &args.password).await?;
    debug!("Login stored under {}", state.paths.data_dir.display());
    Ok(whoami(state))
}

pub fn logout(state: &AppState) -> LoggedOut {
    state.auth().logout();
    LoggedOut {
        redirected_to: state.router.current_route(),
    }
}

pub fn whoami(state: &AppState) -> WhoAmI {
    let Some(session) = state.store.get_session() else {
        return WhoAmI {
            signed_in: false,
            name: None,
            email: None,
            role: None,
        };
    };

    let user = session.user.as_ref();
    WhoAmI {
        signed_in: true,
        name: user.map(|u| u.name.clone()),
        email: user.and_then(|u| u.email.clone()),
        role: active_role(state),
    }
}
