use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub host: Option<String>,
    pub port: Option<u16>,
    pub metrics_port: Option<u16>,
    pub logging_level: Option<String>,
    pub variant: Option<String>,
    pub cors_origin: Option<String>,
    pub catalog_path: Option<String>,
    pub expose_error_details: Option<bool>,

    // Collaborators
    pub classifier: Option<ClassifierConfig>,
    pub music: Option<MusicConfig>,
    pub news: Option<NewsConfig>,
    pub chatbot: Option<ChatbotConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ClassifierConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct MusicConfig {
    pub recommendation_count: Option<usize>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct NewsConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub language: Option<String>,
    pub max_articles: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub queries: Option<NewsQueriesConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct NewsQueriesConfig {
    pub positive: Option<String>,
    pub neutral: Option<String>,
    pub negative: Option<String>,
    pub fallback: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ChatbotConfig {
    /// "ollama" or "openai"
    pub provider: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
    pub system_prompt: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
