//! Shared primitives for the newsdesk workspace.
//!
//! Everything here is dependency-light and used by every other crate:
//! location-tracked errors, HTTP status categorization and the redacted
//! bearer token type.
//!
//! ## Architecture
//!
//! - **common** (this crate): Cross-cutting primitives
//! - **models**: Pure data exchanged with the news API
//! - **client-core**: Session, storage and HTTP pipeline
//! - **newsdesk**: Console application wiring everything together

pub mod bearer_token;
pub mod error;
pub mod http_status;

pub use bearer_token::BearerToken;
pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;

#[cfg(test)]
mod tests;
