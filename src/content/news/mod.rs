//! Sentiment-driven news articles.

mod client;
mod models;

pub use client::{NewsApiClient, NEWSAPI_BASE_URL};
pub use models::{Article, ArticleSource, NewsFeed};

use crate::sentiment::SentimentLabel;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Hard ceiling on the number of articles attached to a response.
pub const MAX_ARTICLES: usize = 5;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,
}

/// An article search service, ranked by relevance.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<Article>, NewsError>;
}

/// Search query used for each sentiment.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsQueries {
    pub positive: String,
    pub neutral: String,
    pub negative: String,
    /// Used when the classifier returns a label we do not recognize.
    pub fallback: String,
}

impl Default for NewsQueries {
    fn default() -> Self {
        Self {
            positive: "mental health success stories".to_string(),
            neutral: "latest mental health research".to_string(),
            negative: "mental health support and therapy".to_string(),
            fallback: "mental health".to_string(),
        }
    }
}

impl NewsQueries {
    pub fn query_for(&self, label: Option<SentimentLabel>) -> &str {
        match label {
            Some(SentimentLabel::Positive) => &self.positive,
            Some(SentimentLabel::Neutral) => &self.neutral,
            Some(SentimentLabel::Negative) => &self.negative,
            None => &self.fallback,
        }
    }
}

pub struct NewsSelector {
    source: Arc<dyn NewsSource>,
    queries: NewsQueries,
    max_articles: usize,
}

impl NewsSelector {
    pub fn new(source: Arc<dyn NewsSource>, queries: NewsQueries, max_articles: usize) -> Self {
        Self {
            source,
            queries,
            max_articles: max_articles.min(MAX_ARTICLES),
        }
    }

    /// Runs one search for the label's query and keeps the top results.
    ///
    /// Search failures are reported inside the returned feed, never as an error.
    pub async fn select(&self, label: Option<SentimentLabel>) -> NewsFeed {
        let query = self.queries.query_for(label);
        match self.source.search(query).await {
            Ok(mut articles) => {
                articles.truncate(self.max_articles);
                NewsFeed::Articles(articles)
            }
            Err(err) => {
                warn!("News search for {:?} failed: {}", query, err);
                NewsFeed::Unavailable {
                    error: err.to_string(),
                }
            }
        }
    }
}
