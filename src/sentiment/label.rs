use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse affect classification of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Neutral,
        SentimentLabel::Negative,
    ];

    /// Parses a label as produced by a classifier or written in a catalog file.
    ///
    /// Accepts the short (`POS`), long (`POSITIVE`) and index (`LABEL_2`) spellings,
    /// case-insensitively. Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "POS" | "POSITIVE" | "LABEL_2" => Some(SentimentLabel::Positive),
            "NEU" | "NEUTRAL" | "LABEL_1" => Some(SentimentLabel::Neutral),
            "NEG" | "NEGATIVE" | "LABEL_0" => Some(SentimentLabel::Negative),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "POS",
            SentimentLabel::Neutral => "NEU",
            SentimentLabel::Negative => "NEG",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a text: the label exactly as the model returned it
/// plus the model's confidence in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// The recognized sentiment, if the raw label is one we know.
    pub fn sentiment(&self) -> Option<SentimentLabel> {
        SentimentLabel::parse(&self.label)
    }
}
