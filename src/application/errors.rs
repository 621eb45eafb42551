//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Drive error: {0}")]
    Drive(#[from] DriveError),

    #[error("Channel error: {0}")]
    Channel(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Google Drive client errors
#[derive(Error, Debug)]
pub enum DriveError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Drive API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid service account key: {0}")]
    InvalidKey(String),
}

/// Folder summarization errors
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("Drive error: {0}")]
    Drive(#[from] DriveError),

    #[error("LLM error: {0}")]
    Llm(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
