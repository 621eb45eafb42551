//! AI configuration

use serde::{Deserialize, Serialize};

/// LLM provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    OpenAi,
    Claude,
}

impl Default for AiProvider {
    fn default() -> Self {
        Self::OpenAi
    }
}

/// Settings for the summarization LLM
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AiConfig {
    /// Which provider to use
    pub provider: AiProvider,

    /// Provider-specific API keys
    pub openai_api_key: Option<String>,
    pub claude_api_key: Option<String>,

    /// Model per provider
    pub openai_model: String,
    pub claude_model: String,

    /// Sampling settings for summary generation
    pub temperature: f32,
    pub max_tokens: u32,

    /// Output cap for one file's summary, in characters
    pub summary_max_chars: usize,
    /// How much extracted document text is fed to the model
    pub input_max_chars: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::OpenAi,
            openai_api_key: None,
            claude_api_key: None,
            openai_model: "gpt-3.5-turbo".to_string(),
            claude_model: "claude-3-haiku-20240307".to_string(),
            temperature: 0.3,
            max_tokens: 300,
            summary_max_chars: 500,
            input_max_chars: 12_000,
        }
    }
}

impl AiConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.openai_api_key = Some(key);
        }
        if let Ok(key) = std::env::var("CLAUDE_API_KEY") {
            config.claude_api_key = Some(key);
        }

        if let Ok(provider) = std::env::var("AI_PROVIDER") {
            match provider.to_lowercase().as_str() {
                "claude" => config.provider = AiProvider::Claude,
                "openai" => config.provider = AiProvider::OpenAi,
                other => tracing::warn!("Unknown AI_PROVIDER '{}', keeping default", other),
            }
        }

        if let Ok(model) = std::env::var("AI_MODEL") {
            match config.provider {
                AiProvider::OpenAi => config.openai_model = model,
                AiProvider::Claude => config.claude_model = model,
            }
        }

        config
    }

    /// API key for the selected provider
    pub fn api_key(&self) -> Option<&str> {
        match self.provider {
            AiProvider::OpenAi => self.openai_api_key.as_deref(),
            AiProvider::Claude => self.claude_api_key.as_deref(),
        }
    }

    /// Model for the selected provider
    pub fn model(&self) -> &str {
        match self.provider {
            AiProvider::OpenAi => &self.openai_model,
            AiProvider::Claude => &self.claude_model,
        }
    }
}
