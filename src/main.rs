use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::{fmt::Debug, path::PathBuf};
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moodmate_server::analysis::Analyzer;
use moodmate_server::classifier::InferenceClassifier;
use moodmate_server::config::{self, AppConfig, LlmProviderKind, NEWS_API_KEY_ENV};
use moodmate_server::content::{
    Chatbot, ContentStrategy, MusicCatalog, MusicSelector, NewsSelector, Variant,
};
use moodmate_server::content::news::NewsApiClient;
use moodmate_server::llm::{LlmProvider, OllamaProvider, OpenAIProvider};
use moodmate_server::server::config::DEFAULT_CORS_ORIGIN;
use moodmate_server::server::{metrics, run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The address to bind to.
    #[clap(long, default_value = "127.0.0.1")]
    pub host: String,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 8000)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Which content to attach to each analysis.
    #[clap(long, default_value = "music")]
    pub variant: Variant,

    /// The browser origin allowed to call the API.
    #[clap(long, default_value = DEFAULT_CORS_ORIGIN)]
    pub cors_origin: String,

    /// Path to the music recommendations JSON file.
    #[clap(long, value_parser = parse_path, default_value = "music_recommendations.json")]
    pub catalog_path: PathBuf,

    /// Reply to failed analyses with a generic message instead of the error text.
    #[clap(long)]
    pub hide_error_details: bool,

    /// Base URL of the sentiment classification server.
    #[clap(long)]
    pub classifier_url: Option<String>,

    /// Bearer token for the classification server.
    #[clap(long)]
    pub classifier_api_key: Option<String>,

    /// API key for the news search service. Falls back to the NEWS_API_KEY environment variable.
    #[clap(long)]
    pub news_api_key: Option<String>,

    /// Base URL of the chat model server.
    #[clap(long)]
    pub chatbot_url: Option<String>,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            host: args.host.clone(),
            port: args.port,
            metrics_port: args.metrics_port,
            logging_level: args.logging_level.clone(),
            variant: args.variant,
            cors_origin: args.cors_origin.clone(),
            catalog_path: args.catalog_path.clone(),
            expose_error_details: !args.hide_error_details,
            classifier_url: args.classifier_url.clone(),
            classifier_api_key: args.classifier_api_key.clone(),
            news_api_key: args
                .news_api_key
                .clone()
                .or_else(|| std::env::var(NEWS_API_KEY_ENV).ok()),
            chatbot_url: args.chatbot_url.clone(),
        }
    }
}

fn load_music_selector(app_config: &AppConfig) -> Result<MusicSelector> {
    let catalog = MusicCatalog::load(&app_config.catalog_path)?;
    metrics::init_catalog_metrics(catalog.len());
    Ok(MusicSelector::new(
        Arc::new(catalog),
        app_config.music.recommendation_count,
    ))
}

fn make_llm_provider(app_config: &AppConfig) -> Arc<dyn LlmProvider> {
    let settings = &app_config.chatbot;
    match settings.provider {
        LlmProviderKind::Ollama => Arc::new(OllamaProvider::new(
            settings.base_url.clone(),
            settings.model.clone(),
        )),
        LlmProviderKind::OpenAI => Arc::new(OpenAIProvider::new(
            settings.base_url.clone(),
            settings.model.clone(),
            settings.api_key.clone(),
        )),
    }
}

fn make_strategy(app_config: &AppConfig) -> Result<ContentStrategy> {
    let strategy = match app_config.variant {
        Variant::Music => ContentStrategy::Music(load_music_selector(app_config)?),
        Variant::News => {
            let settings = &app_config.news;
            let api_key = settings
                .api_key
                .as_deref()
                .context("News API key is not configured")?;
            let client = NewsApiClient::new(
                &settings.base_url,
                api_key,
                &settings.language,
                settings.max_articles,
                settings.timeout,
            )
            .context("Failed to create news client")?;
            ContentStrategy::News(NewsSelector::new(
                Arc::new(client),
                settings.queries.clone(),
                settings.max_articles,
            ))
        }
        Variant::Chatbot => {
            let provider = make_llm_provider(app_config);
            info!(
                "Chat replies from {} model {}",
                provider.name(),
                provider.model()
            );
            ContentStrategy::Chatbot {
                music: load_music_selector(app_config)?,
                chatbot: Chatbot::new(
                    provider,
                    app_config.chatbot.completion_options(),
                    app_config.chatbot.system_prompt.clone(),
                ),
            }
        }
    };
    Ok(strategy)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  variant: {}", app_config.variant);
    info!("  listen: {}:{}", app_config.host, app_config.port);
    info!("  metrics_port: {}", app_config.metrics_port);
    info!("  cors_origin: {}", app_config.cors_origin);
    info!(
        "  classifier: {} ({})",
        app_config.classifier.model, app_config.classifier.base_url
    );

    metrics::init_metrics();

    let classifier = InferenceClassifier::new(
        app_config.classifier.base_url.clone(),
        app_config.classifier.model.clone(),
        app_config.classifier.api_key.clone(),
        app_config.classifier.timeout,
    );
    let strategy = make_strategy(&app_config)?;
    let analyzer = Arc::new(Analyzer::new(Arc::new(classifier), strategy));

    info!(
        "Ready to serve at {}:{} (metrics on port {})",
        app_config.host, app_config.port, app_config.metrics_port
    );

    tokio::select! {
        result = run_server(app_config.server_config(), analyzer) => {
            if let Err(err) = &result {
                error!("Server stopped with error: {:#}", err);
            }
            result
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
            Ok(())
        }
    }
}
