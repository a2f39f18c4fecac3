//! Sentiment-keyed music catalog and recommendation sampling.

use crate::sentiment::SentimentLabel;
use anyhow::{Context, Result};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// A catalog entry. Catalog files may list songs either as a display string
/// ("Happy - Pharrell Williams") or as an object; both are returned to the
/// client in the shape they were written in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Track {
    Plain(String),
    Detailed(TrackDetails),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackDetails {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, alias = "url", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Track {
    pub fn title(&self) -> &str {
        match self {
            Track::Plain(title) => title,
            Track::Detailed(details) => &details.title,
        }
    }
}

/// Mapping from sentiment to the tracks recommended for it.
///
/// Loaded once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct MusicCatalog {
    buckets: HashMap<SentimentLabel, Vec<Track>>,
}

impl MusicCatalog {
    pub fn new(buckets: HashMap<SentimentLabel, Vec<Track>>) -> Self {
        Self { buckets }
    }

    /// Reads a catalog from a JSON object keyed by sentiment label.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read music catalog: {:?}", path))?;
        let catalog = Self::from_json(&content)
            .with_context(|| format!("Failed to parse music catalog: {:?}", path))?;
        info!(
            "Loaded music catalog from {:?} ({} tracks)",
            path,
            catalog.len()
        );
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let raw: HashMap<String, Vec<Track>> = serde_json::from_str(content)?;
        let mut buckets: HashMap<SentimentLabel, Vec<Track>> = HashMap::new();
        for (key, tracks) in raw {
            match SentimentLabel::parse(&key) {
                Some(label) => buckets.entry(label).or_default().extend(tracks),
                None => warn!("Skipping music catalog bucket with unknown label {:?}", key),
            }
        }
        Ok(Self { buckets })
    }

    pub fn bucket(&self, label: SentimentLabel) -> &[Track] {
        self.buckets
            .get(&label)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of tracks across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Samples `count` distinct tracks, uniformly and without replacement,
    /// from the bucket of `label`.
    ///
    /// An unrecognized label selects an empty bucket. A bucket holding fewer
    /// than `count` tracks yields all of them in random order.
    pub fn recommend<R: Rng + ?Sized>(
        &self,
        label: Option<SentimentLabel>,
        count: usize,
        rng: &mut R,
    ) -> Vec<Track> {
        let bucket = label.map(|l| self.bucket(l)).unwrap_or_default();
        if bucket.len() < count {
            warn!(
                "Music bucket {} holds {} track(s), fewer than the {} requested",
                label.map(|l| l.as_str()).unwrap_or("<unrecognized>"),
                bucket.len(),
                count
            );
        }
        bucket.choose_multiple(rng, count).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    const CATALOG_JSON: &str = r#"{
        "POS": ["Happy - Pharrell Williams", "Good as Hell - Lizzo", "Walking on Sunshine - Katrina and the Waves", "Uptown Funk - Bruno Mars"],
        "NEU": [
            {"title": "Weightless", "artist": "Marconi Union", "url": "https://example.com/weightless"},
            {"title": "Clair de Lune", "artist": "Debussy"},
            {"title": "Holocene", "artist": "Bon Iver"}
        ],
        "NEG": ["Fix You - Coldplay", "Someone Like You - Adele"],
        "ANGRY": ["Break Stuff - Limp Bizkit"]
    }"#;

    fn catalog() -> MusicCatalog {
        MusicCatalog::from_json(CATALOG_JSON).unwrap()
    }

    #[test]
    fn loads_known_buckets_and_skips_unknown_ones() {
        let catalog = catalog();
        assert_eq!(catalog.bucket(SentimentLabel::Positive).len(), 4);
        assert_eq!(catalog.bucket(SentimentLabel::Neutral).len(), 3);
        assert_eq!(catalog.bucket(SentimentLabel::Negative).len(), 2);
        assert_eq!(catalog.len(), 9);
    }

    #[test]
    fn accepts_both_track_shapes() {
        let catalog = catalog();
        let neutral = catalog.bucket(SentimentLabel::Neutral);
        assert_eq!(
            neutral[0],
            Track::Detailed(TrackDetails {
                title: "Weightless".to_string(),
                artist: Some("Marconi Union".to_string()),
                link: Some("https://example.com/weightless".to_string()),
            })
        );
        assert_eq!(
            catalog.bucket(SentimentLabel::Positive)[0].title(),
            "Happy - Pharrell Williams"
        );
    }

    #[test]
    fn plain_tracks_serialize_as_strings() {
        let json = serde_json::to_value(Track::Plain("Fix You - Coldplay".to_string())).unwrap();
        assert_eq!(json, serde_json::json!("Fix You - Coldplay"));
    }

    #[test]
    fn recommends_three_distinct_tracks_from_the_bucket() {
        let catalog = catalog();
        let bucket: HashSet<_> = catalog.bucket(SentimentLabel::Positive).iter().collect();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picks = catalog.recommend(Some(SentimentLabel::Positive), 3, &mut rng);
            assert_eq!(picks.len(), 3);
            let distinct: HashSet<_> = picks.iter().collect();
            assert_eq!(distinct.len(), 3);
            assert!(picks.iter().all(|t| bucket.contains(t)));
        }
    }

    #[test]
    fn undersized_bucket_returns_everything_available() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(7);
        let picks = catalog.recommend(Some(SentimentLabel::Negative), 3, &mut rng);
        assert_eq!(picks.len(), 2);
        let expected: HashSet<_> = catalog.bucket(SentimentLabel::Negative).iter().collect();
        let got: HashSet<_> = picks.iter().collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn unrecognized_label_gets_an_empty_recommendation() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(catalog.recommend(None, 3, &mut rng).is_empty());
        assert!(MusicCatalog::default()
            .recommend(Some(SentimentLabel::Positive), 3, &mut rng)
            .is_empty());
    }

    #[test]
    fn rejects_malformed_catalog() {
        assert!(MusicCatalog::from_json("[1, 2, 3]").is_err());
        assert!(MusicCatalog::from_json(r#"{"POS": [42]}"#).is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = MusicCatalog::load(Path::new("/nonexistent/music.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read music catalog"));
    }
}
