//! Typed endpoints on top of [`crate::http::ApiClient`].

pub mod articles;
pub mod auth;

pub use articles::ARTICLES_ENDPOINT;
pub use auth::{AuthService, LOGIN_ENDPOINT, LoginRequest, LoginResponse};
