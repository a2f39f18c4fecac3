//! MoodMate Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod content;
pub mod llm;
pub mod preprocess;
pub mod sentiment;
pub mod server;

// Re-export commonly used types for convenience
pub use analysis::{AnalysisError, AnalysisResponse, Analyzer};
pub use content::{ContentStrategy, Variant};
pub use sentiment::{Classification, SentimentLabel};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
