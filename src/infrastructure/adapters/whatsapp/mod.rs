//! WhatsApp Cloud API adapter

pub mod webhook;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::BotError;
use crate::domain::entities::{InboundMessage, MessageContent};
use crate::domain::traits::{Channel, ChannelInfo};

/// Graph API base URL
const API_BASE: &str = "https://graph.facebook.com/v17.0";

// --- webhook payload types ---
//
// The payload is deserialized once, here at the channel boundary; the rest
// of the pipeline only sees `InboundMessage`.

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub changes: Vec<Change>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Change {
    pub value: ChangeValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeValue {
    #[serde(default)]
    pub messages: Vec<WaMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WaMessage {
    pub from: String,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub text: Option<TextBody>,
    pub document: Option<DocumentBody>,
    pub image: Option<MediaBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextBody {
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentBody {
    pub id: String,
    pub filename: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaBody {
    pub id: String,
    pub caption: Option<String>,
}

impl WebhookPayload {
    /// Flatten the nested payload into typed inbound messages.
    pub fn inbound_messages(&self) -> Vec<InboundMessage> {
        let mut inbound = Vec::new();
        for entry in &self.entry {
            for change in &entry.changes {
                for message in &change.value.messages {
                    inbound.push(message.to_inbound());
                }
            }
        }
        inbound
    }
}

impl WaMessage {
    fn to_inbound(&self) -> InboundMessage {
        tracing::debug!(id = %self.id, kind = %self.kind, "converting inbound message");
        let content = match self.kind.as_str() {
            "text" => match &self.text {
                Some(text) => MessageContent::Text(text.body.clone()),
                None => MessageContent::Unsupported("text".to_string()),
            },
            "document" => match &self.document {
                Some(doc) => MessageContent::Document {
                    media_id: doc.id.clone(),
                    file_name: doc.filename.clone().unwrap_or_else(|| "file".to_string()),
                    caption: doc.caption.clone(),
                },
                None => MessageContent::Unsupported("document".to_string()),
            },
            "image" => match &self.image {
                Some(image) => MessageContent::Image {
                    media_id: image.id.clone(),
                    caption: image.caption.clone(),
                },
                None => MessageContent::Unsupported("image".to_string()),
            },
            other => MessageContent::Unsupported(other.to_string()),
        };
        InboundMessage::new(self.from.clone(), content)
    }
}

// --- outbound client ---

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    messaging_product: &'static str,
    to: &'a str,
    text: SendText<'a>,
}

#[derive(Serialize)]
struct SendText<'a> {
    body: &'a str,
}

#[derive(Deserialize)]
struct SendMessageResponse {
    #[serde(default)]
    messages: Vec<SentMessage>,
}

#[derive(Deserialize)]
struct SentMessage {
    id: String,
}

#[derive(Deserialize)]
struct MediaLookup {
    url: String,
}

/// WhatsApp Cloud API client
pub struct WhatsAppAdapter {
    access_token: String,
    phone_number_id: String,
    client: Client,
}

impl WhatsAppAdapter {
    pub fn new(access_token: impl Into<String>, phone_number_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            phone_number_id: phone_number_id.into(),
            client: Client::new(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", API_BASE, path)
    }
}

#[async_trait]
impl Channel for WhatsAppAdapter {
    async fn send_message(&self, recipient: &str, text: &str) -> Result<String, BotError> {
        let request = SendMessageRequest {
            messaging_product: "whatsapp",
            to: recipient,
            text: SendText { body: text },
        };

        let url = self.api_url(&format!("{}/messages", self.phone_number_id));
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::Channel(format!("send failed ({}): {}", status, body)));
        }

        let data: SendMessageResponse = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(data
            .messages
            .into_iter()
            .next()
            .map(|m| m.id)
            .unwrap_or_else(|| "unknown".to_string()))
    }

    /// Media downloads are two hops: the media id resolves to a short-lived
    /// URL, which is then fetched with the same bearer token.
    async fn download_media(&self, media_id: &str) -> Result<Vec<u8>, BotError> {
        let response = self
            .client
            .get(self.api_url(media_id))
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Channel(format!(
                "media lookup failed: {}",
                response.status()
            )));
        }

        let lookup: MediaLookup = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        let media = self
            .client
            .get(&lookup.url)
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !media.status().is_success() {
            return Err(BotError::Channel(format!(
                "media download failed: {}",
                media.status()
            )));
        }

        let bytes = media.bytes().await.map_err(|e| BotError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn channel_info(&self) -> ChannelInfo {
        ChannelInfo {
            platform: "whatsapp".to_string(),
            account_id: self.phone_number_id.clone(),
        }
    }
}
