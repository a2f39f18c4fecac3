//! Sentiment classification backends.
//!
//! The service never runs a model itself; classification is delegated to an
//! inference server speaking the Hugging Face text-classification protocol.

mod inference;
mod provider;

pub use inference::InferenceClassifier;
#[cfg(feature = "mock")]
pub use provider::MockSentimentClassifier;
pub use provider::{ClassifierError, SentimentClassifier};
