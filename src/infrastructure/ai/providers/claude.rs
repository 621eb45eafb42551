//! Anthropic Claude provider - messages API

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::infrastructure::ai::{ChatMessage, Llm, LlmError, LlmResult};

/// Claude API endpoint
const API_BASE: &str = "https://api.anthropic.com/v1";

/// Default output budget; the messages API requires max_tokens.
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Claude provider
pub struct ClaudeProvider {
    api_key: String,
    client: Client,
    model: String,
}

impl ClaudeProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            model: model.into(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/messages", API_BASE)
    }
}

/// API request structure. System messages travel in the top-level `system`
/// field, not in the message list.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_tokens: u32,
}

/// API response structure
#[derive(Deserialize)]
struct ChatResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[async_trait]
impl Llm for ClaudeProvider {
    fn name(&self) -> &str {
        "claude"
    }

    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
    ) -> LlmResult<String> {
        let (system, chat): (Vec<_>, Vec<_>) =
            messages.into_iter().partition(|m| m.role == "system");
        let system = if system.is_empty() {
            None
        } else {
            Some(system.into_iter().map(|m| m.content).collect::<Vec<_>>().join("\n"))
        };

        let request = ChatRequest {
            model: self.model.clone(),
            messages: chat,
            system,
            temperature,
            max_tokens: max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        };

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        if response.status() == 429 {
            return Err(LlmError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("status: {}, body: {}", status, body)));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        let content = chat_response
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(content)
    }
}
