//! LLM providers

pub mod claude;
pub mod openai;

pub use claude::ClaudeProvider;
pub use openai::OpenAiProvider;
