//! Data contract for the news API.
//!
//! Pure data exchanged with the server: the signed-in user's identity and the
//! article listing. No I/O lives here; `client-core` moves these values over
//! HTTP and the console renders them.

pub mod article;
pub mod error;
pub mod user;

pub use article::query::{ArticleQuery, ArticleQueryBuilder};
pub use article::{Article, ArticleAuthor, ArticleCategory, ArticlePage};
pub use common::ErrorLocation;
pub use error::model_error::ModelError;
pub use user::UserIdentity;

#[cfg(test)]
mod tests;
