//! Text generation backends.
//!
//! A trait-based abstraction over chat-completion servers so the chatbot can
//! run against Ollama or any OpenAI-compatible endpoint.

mod ollama;
mod openai;
mod provider;
mod types;

pub use ollama::OllamaProvider;
pub use openai::OpenAIProvider;
#[cfg(feature = "mock")]
pub use provider::MockLlmProvider;
pub use provider::{CompletionOptions, LlmError, LlmProvider};
pub use types::{CompletionResponse, FinishReason, Message, MessageRole, TokenUsage};
