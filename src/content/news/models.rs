use serde::{Deserialize, Serialize};

/// An article as returned by the search service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: ArticleSource,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// News attached to an analysis response.
///
/// A failed search does not fail the request: the error text is carried in
/// the payload instead (`{"error": "..."}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NewsFeed {
    Articles(Vec<Article>),
    Unavailable { error: String },
}

impl NewsFeed {
    pub fn articles(&self) -> &[Article] {
        match self {
            NewsFeed::Articles(articles) => articles,
            NewsFeed::Unavailable { .. } => &[],
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, NewsFeed::Unavailable { .. })
    }
}
