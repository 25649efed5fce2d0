use super::Report;
use crate::cli::ArticlesArgs;
use crate::error::ConsoleError;
use crate::state::AppState;

use models::article::DEFAULT_EXCERPT_CHARS;
use models::{Article, ArticleQuery};

use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ArticleLine {
    pub title: String,
    pub slug: String,
    pub date: String,
    pub category: Option<String>,
    pub author: Option<String>,
    pub excerpt: String,
}

impl From<&Article> for ArticleLine {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            slug: article.slug.clone(),
            date: article.display_date().to_string(),
            category: article.category.as_ref().map(|c| c.name.clone()),
            author: article.author.as_ref().map(|a| a.name.clone()),
            excerpt: article.excerpt(DEFAULT_EXCERPT_CHARS),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ArticleListing {
    pub page: u32,
    pub total_pages: u32,
    pub articles: Vec<ArticleLine>,
}

impl Report for ArticleListing {
    fn text(&self) -> String {
        if self.articles.is_empty() {
            return "No articles found".to_string();
        }

        let mut out = String::new();
        for line in &self.articles {
            out.push_str(&format!("{}  {}", line.date, line.title));
            if let Some(category) = &line.category {
                out.push_str(&format!(" [{category}]"));
            }
            out.push('\n');
            out.push_str(&format!("    {}\n", line.excerpt));
        }
        out.push_str(&format!("Page {} of {}", self.page, self.total_pages));
        out
    }
}

/// Build the listing query from command arguments.
///
/// Without `--all` only published articles are listed.
pub fn build_query(args: &ArticlesArgs, default_limit: u32) -> Result<ArticleQuery, ConsoleError> {
    let mut builder = ArticleQuery::builder()
        .with_page(args.page)
        .with_limit(args.limit.unwrap_or(default_limit));

    if let Some(search) = &args.search {
        builder = builder.with_search(search.clone());
    }
    if let Some(category) = &args.category {
        builder = builder.with_category(category.clone());
    }
    if !args.all {
        builder = builder.with_published(true);
    }

    builder
        .build()
        .map_err(|e| ConsoleError::invalid_argument(e.to_string()))
}

pub async fn list(state: &AppState, args: &ArticlesArgs) -> Result<ArticleListing, ConsoleError> {
    let query = build_query(args, state.config.page_size)?;
    let page = state.client.list_articles(&query).await?;

    Ok(ArticleListing {
        page: query.page,
        total_pages: page.total_pages,
        articles: page.data.iter().map(ArticleLine::from).collect(),
    })
}
