use async_trait::async_trait;
use crate::application::errors::BotError;

/// Channel trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Channel: Send + Sync {
    /// Send a text message to a recipient. Returns the provider message id.
    async fn send_message(&self, recipient: &str, text: &str) -> Result<String, BotError>;

    /// Download a media attachment by its provider id.
    async fn download_media(&self, media_id: &str) -> Result<Vec<u8>, BotError>;

    /// Get channel info
    fn channel_info(&self) -> ChannelInfo;
}

/// Channel information
#[derive(Debug, Clone)]
pub struct ChannelInfo {
    pub platform: String,
    pub account_id: String,
}
