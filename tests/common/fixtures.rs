//! Test data fixtures
//!
//! Creates the on-disk music catalog and the articles served by stub news sources.

use super::constants::*;
use anyhow::Result;
use moodmate_server::content::{news::ArticleSource, Article};
use serde_json::json;
use std::path::PathBuf;
use tempfile::TempDir;

/// Writes a music catalog to a temporary directory.
///
/// The NEG bucket is intentionally short and an unknown bucket is present,
/// both of which must load without error.
pub fn create_test_catalog() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("music_recommendations.json");

    let catalog = json!({
        "POS": POSITIVE_SONGS,
        "NEU": NEUTRAL_SONGS,
        "NEG": NEGATIVE_SONGS,
        "ANGRY": ["Break Stuff - Limp Bizkit"],
    });
    std::fs::write(&path, serde_json::to_string_pretty(&catalog)?)?;

    Ok((dir, path))
}

/// A realistic article numbered `index`.
pub fn test_article(index: usize) -> Article {
    Article {
        source: ArticleSource {
            id: None,
            name: Some("Wellbeing Weekly".to_string()),
        },
        author: Some("Sam Rivera".to_string()),
        title: Some(format!("Article {}", index)),
        description: Some("A look at what helps.".to_string()),
        url: Some(format!("https://news.example/articles/{}", index)),
        url_to_image: None,
        published_at: Some("2024-05-01T09:00:00Z".to_string()),
        content: None,
    }
}
