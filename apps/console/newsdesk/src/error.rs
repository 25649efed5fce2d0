use client_core::error::{ApiError, ConfigError, CoreError, StorageError};

use common::ErrorLocation;

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by console commands.
///
/// Serializable so `--json` output reports failures in the same shape as
/// results.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ConsoleError {
    /// Error from the console itself (logging, filesystem, output)
    #[error("Console Error: {message} {location}")]
    Console {
        message: String,
        location: ErrorLocation,
    },

    /// Error from client-core operations (storage, config, API calls)
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// The server rejected the session; it has been cleared locally
    #[error("Session Expired: {message} {location}")]
    SessionExpired {
        message: String,
        location: ErrorLocation,
    },

    /// Invalid command arguments
    #[error("Invalid Argument: {message} {location}")]
    InvalidArgument {
        message: String,
        location: ErrorLocation,
    },
}

impl ConsoleError {
    #[track_caller]
    pub fn console(message: impl Into<String>) -> Self {
        ConsoleError::Console {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ConsoleError::InvalidArgument {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for ConsoleError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Api(api) => ConsoleError::from(api),
            other => ConsoleError::Core {
                message: other.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

impl From<ApiError> for ConsoleError {
    #[track_caller]
    fn from(error: ApiError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        if error.is_authorization_expired() {
            ConsoleError::SessionExpired {
                message: error.to_string(),
                location,
            }
        } else {
            ConsoleError::Core {
                message: error.to_string(),
                location,
            }
        }
    }
}

impl From<ConfigError> for ConsoleError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        ConsoleError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StorageError> for ConsoleError {
    #[track_caller]
    fn from(error: StorageError) -> Self {
        ConsoleError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ConsoleError::Console {
            message: format!("Failed to render output: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
