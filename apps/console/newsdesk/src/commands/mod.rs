//! Console commands. Each returns a report that renders as text or JSON.

pub mod articles;
pub mod session;
pub mod visit;

use crate::cli::Command;
use crate::error::ConsoleError;
use crate::state::AppState;

use serde::Serialize;

/// Human-readable rendering of a command's result.
pub trait Report: Serialize {
    fn text(&self) -> String;
}

pub fn render<R: Report>(report: &R, json: bool) -> Result<String, ConsoleError> {
    if json {
        Ok(serde_json::to_string_pretty(report)?)
    } else {
        Ok(report.text())
    }
}

/// Run `command` and render its report.
pub async fn dispatch(state: &AppState, command: Command, json: bool) -> Result<String, ConsoleError> {
    match command {
        Command::Login(args) => render(&session::login(state, &args).await?, json),
        Command::Logout => render(&session::logout(state), json),
        Command::Whoami => render(&session::whoami(state), json),
        Command::Articles(args) => render(&articles::list(state, &args).await?, json),
        Command::Visit { route } => render(&visit::visit(state, &route), json),
    }
}
