mod article;
mod article_query;
mod user;
