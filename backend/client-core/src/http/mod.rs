//! The shared request pipeline for all server calls.
//!
//! ```text
//! ApiRequest -> [request interceptors] -> reqwest -> [response handlers] -> caller
//! ```
//!
//! Request interceptors always finish before dispatch; response handlers
//! always finish before the caller sees the result.

pub mod client;
pub mod interceptor;
pub mod request;
pub mod response;

pub use client::{ApiClient, ApiClientBuilder};
pub use interceptor::{BearerAuth, ContentTypeNegotiation, RequestInterceptor};
pub use request::{ApiRequest, FormPart, MultipartForm, RequestBody};
pub use response::{ApiResponse, ErrorLogger, ResponseHandler, SessionInvalidation};
