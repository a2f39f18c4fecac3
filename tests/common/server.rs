//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own catalog and scripted collaborators.

use super::constants::*;
use super::fixtures::{create_test_catalog, test_article};
use async_trait::async_trait;
use moodmate_server::analysis::Analyzer;
use moodmate_server::classifier::{ClassifierError, SentimentClassifier};
use moodmate_server::content::news::NewsError;
use moodmate_server::content::{
    Article, Chatbot, ContentStrategy, MusicCatalog, MusicSelector, NewsQueries, NewsSelector,
    NewsSource, Variant,
};
use moodmate_server::llm::{
    CompletionOptions, CompletionResponse, FinishReason, LlmError, LlmProvider, Message,
};
use moodmate_server::sentiment::Classification;
use moodmate_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// What the stub classifier answers with.
#[derive(Clone, Copy, Debug)]
pub enum ClassifierScript {
    Label(&'static str, f64),
    Fail,
}

/// What the stub news source answers with.
#[derive(Clone, Copy, Debug)]
pub enum NewsScript {
    Articles(usize),
    Fail,
}

/// Classifier that replies from a script and remembers its inputs
struct ScriptedClassifier {
    script: ClassifierScript,
    seen: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl SentimentClassifier for ScriptedClassifier {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        self.seen.lock().unwrap().push(text.to_string());
        match self.script {
            ClassifierScript::Label(label, confidence) => {
                Ok(Classification::new(label, confidence))
            }
            ClassifierScript::Fail => {
                Err(ClassifierError::Connection(CLASSIFIER_FAILURE.to_string()))
            }
        }
    }
}

/// News source that replies from a script and remembers the queries
struct ScriptedNews {
    script: NewsScript,
    queries: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl NewsSource for ScriptedNews {
    async fn search(&self, query: &str) -> Result<Vec<Article>, NewsError> {
        self.queries.lock().unwrap().push(query.to_string());
        match self.script {
            NewsScript::Articles(count) => Ok((0..count).map(test_article).collect()),
            NewsScript::Fail => Err(NewsError::Api {
                status: 429,
                message: NEWS_FAILURE.to_string(),
            }),
        }
    }
}

/// Chat model that echoes the prompt followed by a fixed continuation
struct EchoingLlm {
    fail: bool,
}

#[async_trait]
impl LlmProvider for EchoingLlm {
    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo-1"
    }

    async fn complete(
        &self,
        messages: &[Message],
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, LlmError> {
        if self.fail {
            return Err(LlmError::Timeout);
        }
        let prompt = messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(CompletionResponse {
            message: Message::assistant(format!("{} {}", prompt, CHAT_CONTINUATION)),
            finish_reason: FinishReason::Stop,
            usage: None,
        })
    }
}

/// Knobs for a test server. `Default` gives a music server that classifies everything as POS.
#[derive(Clone, Debug)]
pub struct TestServerOptions {
    pub variant: Variant,
    pub classifier: ClassifierScript,
    pub news: NewsScript,
    pub llm_fails: bool,
    pub expose_error_details: bool,
}

impl Default for TestServerOptions {
    fn default() -> Self {
        Self {
            variant: Variant::Music,
            classifier: ClassifierScript::Label("POS", 0.9),
            news: NewsScript::Articles(5),
            llm_fails: false,
            expose_error_details: true,
        }
    }
}

/// Test server instance with an isolated catalog
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Texts the classifier was asked to label, in order
    pub classified: Arc<Mutex<Vec<String>>>,

    /// Queries sent to the news source, in order
    pub news_queries: Arc<Mutex<Vec<String>>>,

    // Private fields - keep resources alive until drop
    _temp_catalog_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a music server whose classifier follows `script`
    pub async fn music(script: ClassifierScript) -> Self {
        Self::spawn(TestServerOptions {
            classifier: script,
            ..Default::default()
        })
        .await
    }

    /// Spawns a new test server on a random port
    ///
    /// # Panics
    ///
    /// Panics if the catalog cannot be written or loaded, the port cannot be
    /// bound, or the server doesn't become ready within timeout.
    pub async fn spawn(options: TestServerOptions) -> Self {
        let (temp_catalog_dir, catalog_path) =
            create_test_catalog().expect("Failed to create test catalog");
        let catalog = MusicCatalog::load(&catalog_path).expect("Failed to load test catalog");
        let music = MusicSelector::new(Arc::new(catalog), 3);

        let classified = Arc::new(Mutex::new(Vec::new()));
        let news_queries = Arc::new(Mutex::new(Vec::new()));

        let strategy = match options.variant {
            Variant::Music => ContentStrategy::Music(music),
            Variant::News => ContentStrategy::News(NewsSelector::new(
                Arc::new(ScriptedNews {
                    script: options.news,
                    queries: news_queries.clone(),
                }),
                NewsQueries::default(),
                5,
            )),
            Variant::Chatbot => ContentStrategy::Chatbot {
                music,
                chatbot: Chatbot::new(
                    Arc::new(EchoingLlm {
                        fail: options.llm_fails,
                    }),
                    CompletionOptions::default(),
                    None,
                ),
            },
        };

        let classifier = ScriptedClassifier {
            script: options.classifier,
            seen: classified.clone(),
        };
        let analyzer = Arc::new(Analyzer::new(Arc::new(classifier), strategy));

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            cors_origin: TEST_ORIGIN.to_string(),
            expose_error_details: options.expose_error_details,
            ..Default::default()
        };

        let app = make_app(config, analyzer).expect("Failed to build app");

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            classified,
            news_queries,
            _temp_catalog_dir: temp_catalog_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the liveness endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
