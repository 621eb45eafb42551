//! LLM traits - unified interface over chat-completion providers

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Chat message for LLM conversations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant"
    pub role: String,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }
}

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;

/// LLM provider trait
#[async_trait]
pub trait Llm: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Chat completion; returns the assistant's text.
    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> LlmResult<String>;
}
