use crate::ErrorLocation;
use crate::error::model_error::ModelError;

use std::panic::Location;

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Validated parameters for the paginated article listing.
///
/// Serializes straight into the query string; absent filters are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl ArticleQuery {
    /// The public listing: first page of published articles.
    pub fn published() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            category: None,
            published: Some(true),
        }
    }

    pub fn builder() -> ArticleQueryBuilder {
        ArticleQueryBuilder::default()
    }
}

/// Builder for creating validated ArticleQuery instances.
///
/// Blank search/category strings are treated as "no filter", matching what a
/// cleared search box sends.
#[derive(Debug, Default)]
pub struct ArticleQueryBuilder {
    page: Option<u32>,
    limit: Option<u32>,
    search: Option<String>,
    category: Option<String>,
    published: Option<bool>,
}

impl ArticleQueryBuilder {
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    /// Build the ArticleQuery with validation.
    #[track_caller]
    pub fn build(self) -> Result<ArticleQuery, ModelError> {
        let page = self.page.unwrap_or(1);

        if page == 0 {
            return Err(ModelError::Validation {
                message: String::from("Page must be at least 1"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE);

        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(ModelError::Validation {
                message: format!("Limit must be between 1 and {MAX_PAGE_SIZE}, got {limit}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(ArticleQuery {
            page,
            limit,
            search: non_blank(self.search),
            category: non_blank(self.category),
            published: self.published,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
