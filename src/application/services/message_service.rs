//! One inbound message in, one reply out.

use std::sync::Arc;

use crate::application::messaging::{dispatcher, parser, CommandDispatcher};
use crate::domain::entities::{Command, InboundMessage, MessageContent};
use crate::domain::traits::Channel;

/// Orchestrates the receive -> parse -> dispatch -> send pipeline for a
/// channel adapter.
pub struct MessageService<C: Channel> {
    channel: C,
    dispatcher: Arc<CommandDispatcher>,
}

impl<C: Channel> MessageService<C> {
    pub fn new(channel: C, dispatcher: Arc<CommandDispatcher>) -> Self {
        Self { channel, dispatcher }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Process one inbound message and send exactly one reply. Delivery
    /// failures are logged, never retried.
    pub async fn handle_inbound(&self, message: InboundMessage) {
        tracing::info!(sender = %message.sender, id = %message.id, "processing inbound message");

        let reply = self.reply_for(&message).await;
        if let Err(e) = self.channel.send_message(&message.sender, &reply).await {
            tracing::error!("Failed to send message: {}", e);
        }
    }

    /// Compute the reply without sending it.
    pub async fn reply_for(&self, message: &InboundMessage) -> String {
        match &message.content {
            MessageContent::Text(text) => self.dispatcher.dispatch(parser::parse(text)).await,
            MessageContent::Document { media_id, file_name, caption } => {
                self.handle_document(media_id, file_name, caption.as_deref()).await
            }
            MessageContent::Image { .. } => {
                "📷 Images are not handled. Send a document with an UPLOAD caption, \
                 or type HELP for the command list."
                    .to_string()
            }
            MessageContent::Unsupported(kind) => {
                format!("Unsupported message type: {}. Type 'HELP' for available commands.", kind)
            }
        }
    }

    /// A document whose caption parses as UPLOAD gets stored in Drive.
    async fn handle_document(
        &self,
        media_id: &str,
        file_name: &str,
        caption: Option<&str>,
    ) -> String {
        let upload = caption.map(parser::parse);
        let Some(Command::UploadText { folder_path, file_name: target_name }) = upload else {
            return format!(
                "To store '{}' in Drive, resend it with a caption like:\n\
                 `UPLOAD /FolderName new_filename.pdf`",
                file_name
            );
        };

        let Some(drive) = self.dispatcher.drive() else {
            return dispatcher::DRIVE_UNAVAILABLE.to_string();
        };

        let content = match self.channel.download_media(media_id).await {
            Ok(bytes) => bytes,
            Err(e) => return format!("❌ Error downloading attachment: {}", e),
        };

        match drive
            .upload_file(&folder_path, &target_name, &content, mime_for(&target_name))
            .await
        {
            Ok(text) => text,
            Err(e) => format!("❌ Error executing command: {}", e),
        }
    }
}

/// MIME type from the target file name's extension.
fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name.rsplit('.').next().unwrap_or("");
    match ext.to_ascii_lowercase().as_str() {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}
