//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per server endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::{Method, Response};
use serde_json::json;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// GET /
    pub async fn home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }

    /// POST /analyze/ with `{"text": text}`
    pub async fn analyze(&self, text: &str) -> Response {
        self.client
            .post(format!("{}/analyze/", self.base_url))
            .header("Origin", TEST_ORIGIN)
            .json(&json!({ "text": text }))
            .send()
            .await
            .expect("Analyze request failed")
    }

    /// POST /analyze/ with an arbitrary body sent as JSON
    pub async fn analyze_raw(&self, body: &str) -> Response {
        self.client
            .post(format!("{}/analyze/", self.base_url))
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Analyze request failed")
    }

    /// CORS preflight for POST /analyze/ from `origin`
    pub async fn preflight(&self, origin: &str) -> Response {
        self.client
            .request(Method::OPTIONS, format!("{}/analyze/", self.base_url))
            .header("Origin", origin)
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .send()
            .await
            .expect("Preflight request failed")
    }
}
