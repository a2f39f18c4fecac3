//! Supportive chat replies generated from the user's own words.

use crate::llm::{CompletionOptions, LlmError, LlmProvider, Message};
use crate::sentiment::SentimentLabel;
use std::sync::Arc;
use tracing::debug;

const POSITIVE_SUGGESTION: &str = "I'm glad you're feeling positive! Keep up the good mood with a fun hobby, a walk outside, or maybe call a friend to share your joy.";
const NEGATIVE_SUGGESTION: &str = "I'm here for you. It might help to talk to someone you trust, write your feelings down, or take a break with something relaxing like music or a short nap.";
const NEUTRAL_SUGGESTION: &str = "You seem to be in a neutral state. Maybe try something refreshing\u{2014}like a walk, a good book, or journaling your thoughts.";

/// Fixed advice appended to every reply. Empty for unrecognized labels.
pub fn mood_suggestion(label: Option<SentimentLabel>) -> &'static str {
    match label {
        Some(SentimentLabel::Positive) => POSITIVE_SUGGESTION,
        Some(SentimentLabel::Neutral) => NEUTRAL_SUGGESTION,
        Some(SentimentLabel::Negative) => NEGATIVE_SUGGESTION,
        None => "",
    }
}

pub struct Chatbot {
    provider: Arc<dyn LlmProvider>,
    options: CompletionOptions,
    system_prompt: Option<String>,
}

impl Chatbot {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        options: CompletionOptions,
        system_prompt: Option<String>,
    ) -> Self {
        Self {
            provider,
            options,
            system_prompt,
        }
    }

    /// Generates a continuation of `user_text` and appends the suggestion for `label`.
    pub async fn reply(
        &self,
        user_text: &str,
        label: Option<SentimentLabel>,
    ) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(prompt) = &self.system_prompt {
            messages.push(Message::system(prompt.clone()));
        }
        messages.push(Message::user(user_text));

        let response = self.provider.complete(&messages, &self.options).await?;
        debug!(
            provider = self.provider.name(),
            finish_reason = ?response.finish_reason,
            "Generated chat reply"
        );

        let generated = strip_echoed_prompt(&response.message.content, user_text);
        Ok(format!("{}\n\n{}", generated, mood_suggestion(label)))
    }
}

/// Some completion models repeat the prompt before continuing it.
fn strip_echoed_prompt<'a>(generated: &'a str, prompt: &str) -> &'a str {
    let trimmed = generated.trim_start();
    let prompt = prompt.trim();
    let rest = if !prompt.is_empty() && trimmed.starts_with(prompt) {
        &trimmed[prompt.len()..]
    } else {
        trimmed
    };
    rest.trim()
}
