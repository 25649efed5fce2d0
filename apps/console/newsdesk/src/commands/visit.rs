use super::Report;
use super::session::active_role;
use crate::state::AppState;

use client_core::session::{AdminNav, Navigator, Resolution};

use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct VisitReport {
    pub requested: String,
    /// `authenticated`, `redirecting` or `unguarded`.
    pub outcome: &'static str,
    pub landed_on: String,
    pub menu: Vec<String>,
    pub user_label: Option<String>,
}

impl Report for VisitReport {
    fn text(&self) -> String {
        let mut out = match self.outcome {
            "redirecting" => format!(
                "{} requires a session; redirected to {}",
                self.requested, self.landed_on
            ),
            _ => format!("{} ({})", self.landed_on, self.outcome),
        };

        if let Some(label) = &self.user_label {
            out.push_str(&format!("\nSigned in: {label}"));
        }
        if !self.menu.is_empty() {
            out.push_str(&format!("\nMenu: {}", self.menu.join(" | ")));
        }
        out
    }
}

/// Navigate to `route`, run the guard, and describe the admin shell there.
pub fn visit(state: &AppState, route: &str) -> VisitReport {
    state.router.navigate(route);

    let resolution = state.guard().evaluate(route);
    let landed_on = state.router.current_route();

    let outcome = match resolution {
        Resolution::Authenticated => "authenticated",
        Resolution::Redirecting { .. } => "redirecting",
        Resolution::Unguarded => "unguarded",
    };

    let policy = state.policy();
    let shell = if policy.is_protected(&landed_on) && state.store.is_authenticated() {
        let session = state.store.get_session();
        let role = active_role(state);
        AdminNav::for_route(
            &landed_on,
            &policy,
            session.as_ref().and_then(|s| s.user.as_ref()),
            role.as_deref(),
        )
    } else {
        None
    };

    VisitReport {
        requested: route.to_string(),
        outcome,
        landed_on,
        menu: shell
            .as_ref()
            .map(|nav| nav.entries.iter().map(|e| e.label.to_string()).collect())
            .unwrap_or_default(),
        user_label: shell.map(|nav| nav.user_label),
    }
}
