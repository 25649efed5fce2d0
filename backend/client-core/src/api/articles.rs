use crate::error::ApiError;
use crate::http::{ApiClient, ApiRequest};

use models::{ArticlePage, ArticleQuery};

use log::debug;

pub const ARTICLES_ENDPOINT: &str = "articles";

impl ApiClient {
    /// One page of the article listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the body is not a page.
    pub async fn list_articles(&self, query: &ArticleQuery) -> Result<ArticlePage, ApiError> {
        let request = ApiRequest::get(ARTICLES_ENDPOINT).with_query(query)?;
        let page: ArticlePage = self.send_json(request).await?;

        debug!(
            "Fetched {} articles (page {} of {})",
            page.data.len(),
            query.page,
            page.total_pages
        );
        Ok(page)
    }
}
