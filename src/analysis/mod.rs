//! The per-request pipeline: preprocess, classify, select content, assemble.

use crate::classifier::{ClassifierError, SentimentClassifier};
use crate::content::{ContentStrategy, NewsFeed, Track, Variant};
use crate::llm::LlmError;
use crate::preprocess::demojize;
use crate::server::metrics::{record_analysis, record_upstream_call};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Sentiment classification failed: {0}")]
    Classification(#[from] ClassifierError),

    #[error("Reply generation failed: {0}")]
    Generation(#[from] LlmError),
}

impl AnalysisError {
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Classification(_) => "classification",
            AnalysisError::Generation(_) => "generation",
        }
    }
}

/// Body of a successful `/analyze/` response. Fields the running variant does
/// not produce are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResponse {
    pub sentiment: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_songs: Option<Vec<Track>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news: Option<NewsFeed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chatbot_reply: Option<String>,
}

pub struct Analyzer {
    classifier: Arc<dyn SentimentClassifier>,
    strategy: ContentStrategy,
}

impl Analyzer {
    pub fn new(classifier: Arc<dyn SentimentClassifier>, strategy: ContentStrategy) -> Self {
        Self {
            classifier,
            strategy,
        }
    }

    pub fn variant(&self) -> Variant {
        self.strategy.variant()
    }

    /// Runs the whole pipeline for one piece of user text.
    ///
    /// The first failing step aborts the analysis; no partial response is built.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResponse, AnalysisError> {
        let processed = demojize(text);

        let start = Instant::now();
        let classification = self.classifier.classify(&processed).await;
        record_upstream_call("classifier", classification.is_ok(), start.elapsed());
        let classification = classification?;

        if !(0.0..=1.0).contains(&classification.confidence) {
            return Err(ClassifierError::InvalidResponse(format!(
                "Confidence {} is outside [0, 1]",
                classification.confidence
            ))
            .into());
        }

        let label = classification.sentiment();
        debug!(
            raw_label = %classification.label,
            confidence = classification.confidence,
            recognized = label.is_some(),
            "Classified input"
        );

        let mut response = AnalysisResponse {
            sentiment: classification.label,
            confidence: classification.confidence,
            recommended_songs: None,
            news: None,
            chatbot_reply: None,
        };

        match &self.strategy {
            ContentStrategy::Music(music) => {
                response.recommended_songs = Some(music.select(label));
            }
            ContentStrategy::News(news) => {
                let start = Instant::now();
                let feed = news.select(label).await;
                record_upstream_call("news", !feed.is_unavailable(), start.elapsed());
                response.news = Some(feed);
            }
            ContentStrategy::Chatbot { music, chatbot } => {
                response.recommended_songs = Some(music.select(label));
                let start = Instant::now();
                let reply = chatbot.reply(text, label).await;
                record_upstream_call("chatbot", reply.is_ok(), start.elapsed());
                response.chatbot_reply = Some(reply?);
            }
        }

        record_analysis(self.variant(), label);
        Ok(response)
    }
}
