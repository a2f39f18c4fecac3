mod file_config;

pub use file_config::{
    ChatbotConfig, ClassifierConfig, FileConfig, MusicConfig, NewsConfig, NewsQueriesConfig,
};

use crate::content::{NewsQueries, Variant};
use crate::llm::CompletionOptions;
use crate::server::{RequestsLoggingLevel, ServerConfig};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CLASSIFIER_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_CLASSIFIER_MODEL: &str = "finiteautomata/bertweet-base-sentiment-analysis";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

/// Environment variable consulted for the news API key when none is configured.
pub const NEWS_API_KEY_ENV: &str = "NEWS_API_KEY";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: String,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub variant: Variant,
    pub cors_origin: String,
    pub catalog_path: PathBuf,
    pub expose_error_details: bool,
    pub classifier_url: Option<String>,
    pub classifier_api_key: Option<String>,
    pub news_api_key: Option<String>,
    pub chatbot_url: Option<String>,
}

/// Backend used to generate chat replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LlmProviderKind {
    #[default]
    Ollama,
    #[value(name = "openai")]
    OpenAI,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Core settings
    pub host: String,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub variant: Variant,
    pub cors_origin: String,
    pub catalog_path: PathBuf,
    pub expose_error_details: bool,

    // Collaborators (with defaults)
    pub classifier: ClassifierSettings,
    pub music: MusicSettings,
    pub news: NewsSettings,
    pub chatbot: ChatbotSettings,
}

#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct MusicSettings {
    pub recommendation_count: usize,
}

impl Default for MusicSettings {
    fn default() -> Self {
        Self {
            recommendation_count: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewsSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub language: String,
    pub max_articles: usize,
    pub timeout: Duration,
    pub queries: NewsQueries,
}

#[derive(Debug, Clone)]
pub struct ChatbotSettings {
    pub provider: LlmProviderKind,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
    pub system_prompt: Option<String>,
}

impl ChatbotSettings {
    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            temperature: self.temperature,
            max_tokens: Some(self.max_tokens),
            timeout: self.timeout,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let host = file.host.unwrap_or_else(|| cli.host.clone());
        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = match file.logging_level {
            Some(s) => match parse_logging_level(&s) {
                Some(level) => level,
                None => bail!("Unknown logging_level: {:?}", s),
            },
            None => cli.logging_level.clone(),
        };

        let variant = match file.variant {
            Some(s) => match Variant::from_str(&s, true) {
                Ok(variant) => variant,
                Err(_) => bail!(
                    "Unknown variant {:?}, expected one of: music, news, chatbot",
                    s
                ),
            },
            None => cli.variant,
        };

        let cors_origin = file.cors_origin.unwrap_or_else(|| cli.cors_origin.clone());
        let catalog_path = file
            .catalog_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.catalog_path.clone());
        let expose_error_details = file
            .expose_error_details
            .unwrap_or(cli.expose_error_details);

        let classifier_file = file.classifier.unwrap_or_default();
        let classifier = ClassifierSettings {
            base_url: classifier_file
                .base_url
                .or_else(|| cli.classifier_url.clone())
                .unwrap_or_else(|| DEFAULT_CLASSIFIER_URL.to_string()),
            model: classifier_file
                .model
                .unwrap_or_else(|| DEFAULT_CLASSIFIER_MODEL.to_string()),
            api_key: classifier_file
                .api_key
                .or_else(|| cli.classifier_api_key.clone()),
            timeout: parse_timeout("classifier", classifier_file.timeout_secs, 30)?,
        };

        let music_file = file.music.unwrap_or_default();
        let music = MusicSettings {
            recommendation_count: music_file.recommendation_count.unwrap_or(3),
        };
        if music.recommendation_count == 0 {
            bail!("music.recommendation_count must be at least 1");
        }

        let news = resolve_news(cli, file.news.unwrap_or_default())?;
        if variant == Variant::News && news.api_key.is_none() {
            bail!(
                "The news variant needs an API key, set news.api_key or {}",
                NEWS_API_KEY_ENV
            );
        }

        let chatbot = resolve_chatbot(cli, file.chatbot.unwrap_or_default())?;

        Ok(Self {
            host,
            port,
            metrics_port,
            logging_level,
            variant,
            cors_origin,
            catalog_path,
            expose_error_details,
            classifier,
            music,
            news,
            chatbot,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            host: self.host.clone(),
            port: self.port,
            metrics_port: self.metrics_port,
            cors_origin: self.cors_origin.clone(),
            expose_error_details: self.expose_error_details,
        }
    }
}

fn resolve_news(cli: &CliConfig, news_file: NewsConfig) -> Result<NewsSettings> {
    let defaults = NewsQueries::default();
    let queries_file = news_file.queries.unwrap_or_default();
    let queries = NewsQueries {
        positive: queries_file.positive.unwrap_or(defaults.positive),
        neutral: queries_file.neutral.unwrap_or(defaults.neutral),
        negative: queries_file.negative.unwrap_or(defaults.negative),
        fallback: queries_file.fallback.unwrap_or(defaults.fallback),
    };
    for (name, query) in [
        ("positive", &queries.positive),
        ("neutral", &queries.neutral),
        ("negative", &queries.negative),
        ("fallback", &queries.fallback),
    ] {
        if query.trim().is_empty() {
            bail!("news.queries.{} must not be empty", name);
        }
    }

    let max_articles = news_file.max_articles.unwrap_or(crate::content::news::MAX_ARTICLES);
    if max_articles == 0 {
        bail!("news.max_articles must be at least 1");
    }

    Ok(NewsSettings {
        base_url: news_file
            .base_url
            .unwrap_or_else(|| crate::content::news::NEWSAPI_BASE_URL.to_string()),
        api_key: news_file
            .api_key
            .or_else(|| cli.news_api_key.clone())
            .filter(|key| !key.trim().is_empty()),
        language: news_file.language.unwrap_or_else(|| "en".to_string()),
        max_articles,
        timeout: parse_timeout("news", news_file.timeout_secs, 10)?,
        queries,
    })
}

fn resolve_chatbot(cli: &CliConfig, chatbot_file: ChatbotConfig) -> Result<ChatbotSettings> {
    let provider = match chatbot_file.provider {
        Some(s) => match LlmProviderKind::from_str(&s, true) {
            Ok(provider) => provider,
            Err(_) => bail!(
                "Unknown chatbot.provider {:?}, expected ollama or openai",
                s
            ),
        },
        None => LlmProviderKind::default(),
    };

    let (default_url, default_model) = match provider {
        LlmProviderKind::Ollama => (DEFAULT_OLLAMA_URL, "llama3.2"),
        LlmProviderKind::OpenAI => (DEFAULT_OPENAI_URL, "gpt-4o-mini"),
    };

    let temperature = chatbot_file.temperature.unwrap_or(0.7);
    if !(0.0..=2.0).contains(&temperature) {
        bail!("chatbot.temperature must be between 0 and 2, got {}", temperature);
    }

    Ok(ChatbotSettings {
        provider,
        base_url: chatbot_file
            .base_url
            .or_else(|| cli.chatbot_url.clone())
            .unwrap_or_else(|| default_url.to_string()),
        model: chatbot_file
            .model
            .unwrap_or_else(|| default_model.to_string()),
        api_key: chatbot_file.api_key,
        max_tokens: chatbot_file.max_tokens.unwrap_or(200),
        temperature,
        timeout: parse_timeout("chatbot", chatbot_file.timeout_secs, 60)?,
        system_prompt: chatbot_file.system_prompt,
    })
}

fn parse_timeout(section: &str, value: Option<u64>, default_secs: u64) -> Result<Duration> {
    let secs = value.unwrap_or(default_secs);
    if secs == 0 {
        bail!("{}.timeout_secs must be greater than zero", section);
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
