use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when a secret-bearing value is asked to leave the process implicitly.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Secret Serialization Refused: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}
