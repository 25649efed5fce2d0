//! Error taxonomy for calls made through the shared API client.
//!
//! - HTTP status codes stored directly (not parsed from strings)
//! - 401 has its own variant because it is the only error with a global
//!   side effect (session invalidation)
//! - All errors include ErrorLocation, captured with `#[track_caller]`

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("Network Failure: {message} {location}")]
    NetworkFailure {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("Authorization Expired: HTTP {status_code} - {message} {location}")]
    AuthorizationExpired {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Client Error: HTTP {status_code} - {message} {location}")]
    ClientError {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("Server Error: HTTP {status_code} - {message} {location}")]
    ServerError {
        status_code: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Request Build Error: {message} {location}")]
    RequestBuild {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    /// Classify a completed, non-2xx response.
    #[track_caller]
    pub fn from_status(status_code: impl Into<HttpStatusCode>, body: impl Into<String>) -> Self {
        let status_code = status_code.into();
        let message = body.into();
        let location = ErrorLocation::from(Location::caller());

        if status_code.is_unauthorized() {
            ApiError::AuthorizationExpired {
                status_code,
                message,
                location,
            }
        } else if status_code.is_client_error() {
            ApiError::ClientError {
                status_code,
                message,
                location,
            }
        } else {
            ApiError::ServerError {
                status_code,
                message,
                location,
            }
        }
    }

    /// Create from a transport error with proper categorization.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_decode() {
            return ApiError::Json {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        if error.is_builder() {
            return ApiError::RequestBuild {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        if let Some(status) = error.status() {
            return ApiError::from_status(status.as_u16(), error.to_string());
        }

        ApiError::NetworkFailure {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn request_build(message: impl Into<String>) -> Self {
        ApiError::RequestBuild {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// True only for the 401 that invalidates the session globally.
    pub fn is_authorization_expired(&self) -> bool {
        matches!(self, ApiError::AuthorizationExpired { .. })
    }

    /// Get HTTP status code if a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::AuthorizationExpired { status_code, .. }
            | ApiError::ClientError { status_code, .. }
            | ApiError::ServerError { status_code, .. } => Some(status_code.0),
            _ => None,
        }
    }

    /// Get error category for logging.
    pub fn error_category(&self) -> &'static str {
        match self {
            ApiError::NetworkFailure {
                is_timeout: true, ..
            } => "timeout",
            ApiError::NetworkFailure {
                is_connection: true,
                ..
            } => "connection",
            ApiError::NetworkFailure { .. } => "network",
            ApiError::AuthorizationExpired { .. } => "authorization_expired",
            ApiError::ClientError { .. } => "client_error",
            ApiError::ServerError { .. } => "server_error",
            ApiError::Json { .. } => "json",
            ApiError::UrlParse { .. } => "url_parse",
            ApiError::RequestBuild { .. } => "request_build",
        }
    }
}

impl From<url::ParseError> for ApiError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ApiError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        ApiError::from_reqwest(&error)
    }
}

impl From<serde_json::Error> for ApiError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ApiError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
