//! HTTP client for a NewsAPI-compatible article search.

use super::models::Article;
use super::{NewsError, NewsSource};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const NEWSAPI_BASE_URL: &str = "https://newsapi.org/v2";

/// Client for the `/everything` search endpoint.
pub struct NewsApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
    page_size: usize,
}

#[derive(Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

impl NewsApiClient {
    /// Create a new news client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "https://newsapi.org/v2")
    /// * `api_key` - API key, sent in the `X-Api-Key` header
    /// * `language` - ISO-639-1 language filter
    /// * `page_size` - How many articles to ask for
    /// * `timeout` - Request timeout
    pub fn new(
        base_url: &str,
        api_key: &str,
        language: &str,
        page_size: usize,
        timeout: Duration,
    ) -> Result<Self, NewsError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NewsError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            language: language.to_string(),
            page_size,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn search(&self, query: &str) -> Result<Vec<Article>, NewsError> {
        let url = format!("{}/everything", self.base_url);
        let page_size = self.page_size.to_string();

        debug!(query = %query, "Searching news articles");

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", query),
                ("language", self.language.as_str()),
                ("sortBy", "relevancy"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NewsError::Timeout
                } else {
                    NewsError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NewsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: EverythingResponse = response
            .json()
            .await
            .map_err(|e| NewsError::InvalidResponse(e.to_string()))?;

        debug!(count = body.articles.len(), "Received news articles");

        Ok(body.articles)
    }
}
