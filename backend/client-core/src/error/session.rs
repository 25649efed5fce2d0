use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("Empty Token Error: a session requires a non-empty bearer token {location}")]
    EmptyToken { location: ErrorLocation },
}

impl SessionError {
    #[track_caller]
    pub fn empty_token() -> Self {
        SessionError::EmptyToken {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
