//! Client core for the newsroom admin console.
//!
//! - [`storage`]: durable key-value stores mirroring the session
//! - [`session`]: credential store, bootstrap, route guard and admin menu
//! - [`http`]: the shared API client and its interceptor chains
//! - [`api`]: typed endpoints (articles, login)
//! - [`config`]: persisted client settings

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod storage;

#[cfg(test)]
mod tests;

pub const ADMIN_ROUTE_PREFIX: &str = "/admin";
pub const LOGIN_PATH: &str = const_format::concatcp!(ADMIN_ROUTE_PREFIX, "/login");
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api/";
