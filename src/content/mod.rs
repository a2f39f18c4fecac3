//! Content attached to an analysis, chosen by sentiment.
//!
//! Which kind of content a deployment serves is fixed at startup through
//! [`ContentStrategy`].

pub mod chatbot;
pub mod music;
pub mod news;

pub use chatbot::{mood_suggestion, Chatbot};
pub use music::{MusicCatalog, Track, TrackDetails};
pub use news::{Article, NewsFeed, NewsQueries, NewsSelector, NewsSource};

use crate::sentiment::SentimentLabel;
use std::sync::Arc;

/// The flavour of service being run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Variant {
    /// Song recommendations.
    #[default]
    Music,
    /// News articles.
    News,
    /// A generated chat reply, plus song recommendations.
    Chatbot,
}

impl Variant {
    pub fn liveness_message(&self) -> &'static str {
        match self {
            Variant::Music => "Sentiment Analysis API is running!",
            Variant::News => "Sentiment Analysis API with News Feature is running!",
            Variant::Chatbot => "Sentiment Analysis API is running!",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Variant::Music => "music",
            Variant::News => "news",
            Variant::Chatbot => "chatbot",
        };
        f.write_str(name)
    }
}

/// Samples recommendations from a shared catalog.
#[derive(Clone)]
pub struct MusicSelector {
    catalog: Arc<MusicCatalog>,
    count: usize,
}

impl MusicSelector {
    pub fn new(catalog: Arc<MusicCatalog>, count: usize) -> Self {
        Self { catalog, count }
    }

    pub fn select(&self, label: Option<SentimentLabel>) -> Vec<Track> {
        self.catalog.recommend(label, self.count, &mut rand::rng())
    }
}

pub enum ContentStrategy {
    Music(MusicSelector),
    News(NewsSelector),
    Chatbot {
        music: MusicSelector,
        chatbot: Chatbot,
    },
}

impl ContentStrategy {
    pub fn variant(&self) -> Variant {
        match self {
            ContentStrategy::Music(_) => Variant::Music,
            ContentStrategy::News(_) => Variant::News,
            ContentStrategy::Chatbot { .. } => Variant::Chatbot,
        }
    }
}
