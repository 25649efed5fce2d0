pub mod query;

use serde::{Deserialize, Serialize};

/// Default excerpt length used by listing views.
pub const DEFAULT_EXCERPT_CHARS: usize = 150;

const EXCERPT_ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleAuthor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleCategory {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// A news article as returned by the listing endpoint.
///
/// Timestamps are kept as the server's ISO-8601 strings; formatting them is
/// the renderer's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<ArticleAuthor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ArticleCategory>,
}

impl Article {
    /// Content cut to at most `max_chars` characters, with `...` appended when cut.
    pub fn excerpt(&self, max_chars: usize) -> String {
        if self.content.chars().count() <= max_chars {
            return self.content.clone();
        }

        let mut excerpt: String = self.content.chars().take(max_chars).collect();
        excerpt.push_str(EXCERPT_ELLIPSIS);
        excerpt
    }

    /// Date shown in listings: publication date, falling back to creation.
    pub fn display_date(&self) -> &str {
        self.published_at.as_deref().unwrap_or(&self.created_at)
    }
}

/// One page of the article listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    #[serde(default)]
    pub data: Vec<Article>,
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
}

impl ArticlePage {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn has_next(&self, current_page: u32) -> bool {
        current_page < self.total_pages
    }
}

fn default_total_pages() -> u32 {
    1
}
