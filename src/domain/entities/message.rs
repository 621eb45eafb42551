use chrono::{DateTime, Utc};

/// Content of an inbound WhatsApp message, validated once at the channel
/// boundary. The rest of the pipeline never sees raw webhook JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    Document {
        media_id: String,
        file_name: String,
        caption: Option<String>,
    },
    Image {
        media_id: String,
        caption: Option<String>,
    },
    /// Message types the bot does not handle; carries the raw type tag
    Unsupported(String),
}

impl MessageContent {
    pub fn text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// An inbound message from the channel.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    /// Sender identifier (phone number for WhatsApp)
    pub sender: String,
    pub content: MessageContent,
    pub timestamp: DateTime<Utc>,
}

impl InboundMessage {
    pub fn new(sender: impl Into<String>, content: MessageContent) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender: sender.into(),
            content,
            timestamp: Utc::now(),
        }
    }

    pub fn from_text(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(sender, MessageContent::Text(text.into()))
    }
}
