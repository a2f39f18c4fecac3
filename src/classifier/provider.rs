//! Sentiment classifier trait definition.

use crate::sentiment::Classification;
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when asking a classifier for a label.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,
}

/// Maps text to a sentiment label and a confidence score.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Name of the model doing the classification, for logs.
    fn model(&self) -> &str;

    /// Classify `text`. The returned confidence is always within `[0, 1]`.
    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError>;
}
