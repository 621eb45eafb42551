//! Console adapter for development/testing

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::traits::{Channel, ChannelInfo};

/// Console channel for local development: replies are printed to stdout.
pub struct ConsoleAdapter {
    info: ChannelInfo,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: ChannelInfo {
                platform: "console".to_string(),
                account_id: "console".to_string(),
            },
        }
    }

    pub fn read_line(&self, prompt: &str) -> Option<String> {
        use std::io::Write;
        print!("{}", prompt);
        std::io::stdout().flush().ok()?;
        let mut input = String::new();
        match std::io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(input.trim().to_string()),
        }
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Channel for ConsoleAdapter {
    async fn send_message(&self, _recipient: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        Ok("console_msg".to_string())
    }

    async fn download_media(&self, _media_id: &str) -> Result<Vec<u8>, BotError> {
        Err(BotError::Channel("no media on the console channel".to_string()))
    }

    fn channel_info(&self) -> ChannelInfo {
        self.info.clone()
    }
}
