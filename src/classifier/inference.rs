//! HTTP classifier speaking the Hugging Face text-classification protocol.
//!
//! Works with the hosted Inference API and with self-hosted servers exposing
//! the same `POST /models/{model}` route with `{"inputs": "..."}` bodies.

use super::provider::{ClassifierError, SentimentClassifier};
use crate::sentiment::Classification;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub struct InferenceClassifier {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl InferenceClassifier {
    /// Create a new classifier client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the inference server (e.g., "https://api-inference.huggingface.co").
    /// * `model` - Model identifier (e.g., "finiteautomata/bertweet-base-sentiment-analysis").
    /// * `api_key` - Optional bearer token.
    /// * `timeout` - Per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            timeout,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }
}

#[async_trait]
impl SentimentClassifier for InferenceClassifier {
    fn model(&self) -> &str {
        &self.model
    }

    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        let request = InferenceRequest { inputs: text };

        debug!(model = %self.model, chars = text.chars().count(), "Sending classification request");

        let mut req_builder = self.client.post(self.endpoint()).json(&request);
        if let Some(api_key) = &self.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req_builder
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifierError::Timeout
                } else {
                    ClassifierError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let scores: InferenceResponse = response.json().await.map_err(|e| {
            ClassifierError::InvalidResponse(format!("Failed to parse classifier response: {}", e))
        })?;

        let best = scores.into_top_label().ok_or_else(|| {
            ClassifierError::InvalidResponse("No labels in classifier response".to_string())
        })?;

        if !(0.0..=1.0).contains(&best.score) {
            return Err(ClassifierError::InvalidResponse(format!(
                "Score {} for label {} is outside [0, 1]",
                best.score, best.label
            )));
        }

        debug!(label = %best.label, score = best.score, "Received classification");

        Ok(Classification::new(best.label, best.score))
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Servers answer either with one list of scores per input or with a flat
/// list when a single input was sent.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batched(Vec<Vec<LabelScore>>),
    Single(Vec<LabelScore>),
}

impl InferenceResponse {
    fn into_top_label(self) -> Option<LabelScore> {
        let scores = match self {
            InferenceResponse::Batched(batches) => batches.into_iter().next()?,
            InferenceResponse::Single(scores) => scores,
        };
        scores
            .into_iter()
            .filter(|s| !s.score.is_nan())
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}
