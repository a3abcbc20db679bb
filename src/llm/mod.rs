//! OpenAI-compatible chat completion client.
//!
//! The reply service uses this as its last resort before the canned
//! fallback answer: one non-streaming completion per message, no history.
//!
//! # Example
//!
//! ```rust,ignore
//! use mindbuddy::llm::{ChatCompletionsClient, LlmSettings};
//!
//! let settings = LlmSettings::openai("sk-...", "gpt-3.5-turbo");
//! let client = ChatCompletionsClient::new(settings);
//! let answer = client.complete_single(SYSTEM_PROMPT, "hello").await?;
//! ```

pub mod chat_completions;
pub mod provider;

pub use chat_completions::ChatCompletionsClient;
pub use provider::Provider;

use serde::{Deserialize, Serialize};

/// System prompt that frames the model as MindBuddy.
pub const SYSTEM_PROMPT: &str = "You are MindBuddy, a compassionate mental well-being assistant. \
Provide empathetic, non-judgmental, and practical coping strategies and resources. \
Do NOT provide medical diagnosis, legal, or emergency services instructions. \
Always include a suggestion to seek professional help when appropriate, and offer self-care tips.";

/// LLM connection and sampling settings.
#[derive(Clone)]
pub struct LlmSettings {
    /// Base URL for the LLM API (e.g., `https://api.openai.com`).
    pub base_url: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Model identifier (e.g., `gpt-3.5-turbo`).
    pub model: String,
    /// Provider type, detected from `base_url`.
    pub provider: Provider,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("provider", &self.provider)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl LlmSettings {
    /// Settings for the public `OpenAI` endpoint with default sampling.
    #[must_use]
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: api_key.into(),
            model: model.into(),
            provider: Provider::OpenAI,
            max_tokens: 300,
            temperature: 0.7,
        }
    }
}

/// Role of a chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A message sent to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Errors from the completion endpoint.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Transport failure or non-success status.
    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response carried no usable message content.
    #[error("LLM response contained no message content")]
    EmptyResponse,
}
