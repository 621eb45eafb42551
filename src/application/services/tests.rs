//! End-to-end tests for the message service, with channel and drive doubles

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::application::errors::{BotError, DriveError};
use crate::application::messaging::dispatcher::DRIVE_UNAVAILABLE;
use crate::application::messaging::CommandDispatcher;
use crate::application::services::MessageService;
use crate::domain::entities::{InboundMessage, MessageContent, RemoteFile};
use crate::domain::traits::{Channel, ChannelInfo, DriveStorage};

/// Channel double that records outbound messages and serves canned media.
struct RecordingChannel {
    sent: Mutex<Vec<(String, String)>>,
    media: Option<Vec<u8>>,
}

impl RecordingChannel {
    fn new() -> Self {
        Self { sent: Mutex::new(Vec::new()), media: None }
    }

    fn with_media(media: &[u8]) -> Self {
        Self { sent: Mutex::new(Vec::new()), media: Some(media.to_vec()) }
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Channel for RecordingChannel {
    async fn send_message(&self, recipient: &str, text: &str) -> Result<String, BotError> {
        self.sent.lock().unwrap().push((recipient.to_string(), text.to_string()));
        Ok("msg-1".to_string())
    }

    async fn download_media(&self, _media_id: &str) -> Result<Vec<u8>, BotError> {
        match &self.media {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(BotError::Channel("no media".to_string())),
        }
    }

    fn channel_info(&self) -> ChannelInfo {
        ChannelInfo { platform: "test".to_string(), account_id: "test".to_string() }
    }
}

/// Drive double that records uploads.
#[derive(Default)]
struct UploadDrive {
    uploads: Mutex<Vec<(String, String, usize, String)>>,
    calls: AtomicUsize,
}

#[async_trait]
impl DriveStorage for UploadDrive {
    async fn list_files(&self, folder_path: &str) -> Result<String, DriveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("Files in '{}':", folder_path))
    }

    async fn delete_file(&self, file_path: &str) -> Result<String, DriveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("✅ Successfully deleted '{}'", file_path))
    }

    async fn move_file(&self, _source: &str, _dest: &str) -> Result<String, DriveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("moved".to_string())
    }

    async fn rename_file(&self, _current: &str, _new: &str) -> Result<String, DriveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("renamed".to_string())
    }

    async fn upload_file(
        &self,
        folder: &str,
        name: &str,
        content: &[u8],
        mime: &str,
    ) -> Result<String, DriveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.uploads.lock().unwrap().push((
            folder.to_string(),
            name.to_string(),
            content.len(),
            mime.to_string(),
        ));
        Ok(format!("✅ Successfully uploaded '{}' to '{}'", name, folder))
    }

    async fn resolve_folder_id(&self, _folder_path: &str) -> Result<String, DriveError> {
        Ok("root".to_string())
    }

    async fn list_folder(&self, _folder_path: &str) -> Result<Vec<RemoteFile>, DriveError> {
        Ok(Vec::new())
    }

    async fn download_file(&self, _file_id: &str) -> Result<Vec<u8>, DriveError> {
        Ok(Vec::new())
    }

    async fn export_text(&self, _file_id: &str) -> Result<String, DriveError> {
        Ok(String::new())
    }
}

fn service_with_drive(
    channel: RecordingChannel,
    drive: Arc<UploadDrive>,
) -> MessageService<RecordingChannel> {
    let dispatcher = Arc::new(CommandDispatcher::new(Some(drive), None));
    MessageService::new(channel, dispatcher)
}

#[tokio::test]
async fn text_command_round_trip() {
    let drive = Arc::new(UploadDrive::default());
    let service = service_with_drive(RecordingChannel::new(), drive);

    let message = InboundMessage::from_text("6281234", "RENAME old.pdf new.pdf");
    service.handle_inbound(message).await;

    let sent = service.channel().sent();
    assert_eq!(sent, vec![("6281234".to_string(), "renamed".to_string())]);
}

#[tokio::test]
async fn unknown_text_gets_help_pointer() {
    let drive = Arc::new(UploadDrive::default());
    let service = service_with_drive(RecordingChannel::new(), drive.clone());

    service.handle_inbound(InboundMessage::from_text("6281234", "banana")).await;

    let sent = service.channel().sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].1.contains("banana"));
    assert!(sent[0].1.contains("HELP"));
    assert_eq!(drive.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn storage_commands_without_drive_get_the_fixed_sentence() {
    let dispatcher = Arc::new(CommandDispatcher::new(None, None));
    let service = MessageService::new(RecordingChannel::new(), dispatcher);

    service.handle_inbound(InboundMessage::from_text("6281234", "LIST /")).await;

    let sent = service.channel().sent();
    assert_eq!(sent, vec![("6281234".to_string(), DRIVE_UNAVAILABLE.to_string())]);
}

#[tokio::test]
async fn document_with_upload_caption_is_stored() {
    let drive = Arc::new(UploadDrive::default());
    let service = service_with_drive(RecordingChannel::with_media(b"%PDF-1.4 test"), drive.clone());

    let message = InboundMessage::new(
        "6281234",
        MessageContent::Document {
            media_id: "media-9".to_string(),
            file_name: "report.pdf".to_string(),
            caption: Some("UPLOAD /Reports q3.pdf".to_string()),
        },
    );
    service.handle_inbound(message).await;

    let uploads = drive.uploads.lock().unwrap().clone();
    assert_eq!(
        uploads,
        vec![(
            "/Reports".to_string(),
            "q3.pdf".to_string(),
            b"%PDF-1.4 test".len(),
            "application/pdf".to_string()
        )]
    );

    let sent = service.channel().sent();
    assert_eq!(sent[0].1, "✅ Successfully uploaded 'q3.pdf' to '/Reports'");
}

#[tokio::test]
async fn document_without_upload_caption_gets_guidance() {
    let drive = Arc::new(UploadDrive::default());
    let service = service_with_drive(RecordingChannel::with_media(b"bytes"), drive.clone());

    let message = InboundMessage::new(
        "6281234",
        MessageContent::Document {
            media_id: "media-9".to_string(),
            file_name: "report.pdf".to_string(),
            caption: None,
        },
    );
    service.handle_inbound(message).await;

    let sent = service.channel().sent();
    assert!(sent[0].1.contains("UPLOAD /FolderName"));
    assert_eq!(drive.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn media_download_failure_is_reported_not_propagated() {
    let drive = Arc::new(UploadDrive::default());
    // Channel with no media: download fails.
    let service = service_with_drive(RecordingChannel::new(), drive.clone());

    let message = InboundMessage::new(
        "6281234",
        MessageContent::Document {
            media_id: "media-9".to_string(),
            file_name: "report.pdf".to_string(),
            caption: Some("UPLOAD /Reports q3.pdf".to_string()),
        },
    );
    service.handle_inbound(message).await;

    let sent = service.channel().sent();
    assert!(sent[0].1.starts_with("❌ Error downloading attachment:"), "got: {}", sent[0].1);
    assert_eq!(drive.calls.load(Ordering::SeqCst), 0);
}
