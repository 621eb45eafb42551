//! Command dispatcher - maps a parsed command onto exactly one remote call
//!
//! Every path through `dispatch` resolves to a display string. Capability
//! errors are rendered here; nothing structured ever reaches the channel.

use std::sync::Arc;

use crate::domain::entities::Command;
use crate::domain::traits::{DriveStorage, Summarizer};

/// Help message, one example per command.
pub const HELP_TEXT: &str = "\
🤖 *Google Drive Assistant Help* 🤖

Here are the available commands:

*📁 LIST*
• `LIST /FolderName` - List files in a folder
• `LIST /` - List files in the root directory

*🗑️ DELETE*
• `DELETE /FolderName/file.pdf` - Delete a file or folder

*📦 MOVE*
• `MOVE /FolderName/file.pdf /Archive` - Move a file to another folder

*📊 SUMMARY*
• `SUMMARY /FolderName` - AI summary of all files in a folder

*✏️ RENAME*
• `RENAME file.pdf new_file.pdf` - Rename a file

*⬆️ UPLOAD*
• Send a file with the caption: `UPLOAD /FolderName new_filename.pdf`

*Need help?* Just type `HELP`";

/// One fixed sentence for every command that needs Drive, whichever it was.
pub const DRIVE_UNAVAILABLE: &str =
    "⚠️ Google Drive is not configured. Please check the server setup.";

/// Reply for a bare `UPLOAD` text command: the command alone carries no
/// file content, the binary arrives as a document message with a caption.
pub const UPLOAD_HINT: &str = "\
📎 The UPLOAD command only works as a file caption.

Send the file as an attachment with the caption:
`UPLOAD /FolderName new_filename.pdf`";

pub fn unknown_reply(raw: &str) -> String {
    format!("❌ Unknown command: {}\n\nType 'HELP' for available commands.", raw)
}

fn failure_reply(description: &str) -> String {
    format!("❌ Error executing command: {}", description)
}

/// Routes each command to the one capability call that serves it.
///
/// Capability availability is decided once at startup and handed in here;
/// the dispatcher holds only shared references, so concurrent dispatches
/// are independent.
pub struct CommandDispatcher {
    drive: Option<Arc<dyn DriveStorage>>,
    summarizer: Option<Arc<dyn Summarizer>>,
}

impl CommandDispatcher {
    pub fn new(
        drive: Option<Arc<dyn DriveStorage>>,
        summarizer: Option<Arc<dyn Summarizer>>,
    ) -> Self {
        Self { drive, summarizer }
    }

    /// The Drive capability, if configured. Used by the document-upload
    /// flow, which runs outside the text-command table.
    pub fn drive(&self) -> Option<&Arc<dyn DriveStorage>> {
        self.drive.as_ref()
    }

    pub fn drive_available(&self) -> bool {
        self.drive.is_some()
    }

    /// Execute one command and produce the reply text.
    pub async fn dispatch(&self, cmd: Command) -> String {
        tracing::info!(command = cmd.keyword(), "dispatching command");

        // Availability is checked before any capability method is called.
        if cmd.requires_drive() && self.drive.is_none() {
            return DRIVE_UNAVAILABLE.to_string();
        }

        let outcome = match (cmd, self.drive.as_deref()) {
            (Command::Help, _) => return HELP_TEXT.to_string(),
            (Command::Unknown { raw }, _) => return unknown_reply(&raw),
            (Command::UploadText { .. }, Some(_)) => return UPLOAD_HINT.to_string(),
            (Command::List { folder_path }, Some(drive)) => {
                drive.list_files(&folder_path).await.map_err(|e| e.to_string())
            }
            (Command::Delete { file_path }, Some(drive)) => {
                drive.delete_file(&file_path).await.map_err(|e| e.to_string())
            }
            (Command::Move { source_path, dest_path }, Some(drive)) => {
                drive.move_file(&source_path, &dest_path).await.map_err(|e| e.to_string())
            }
            (Command::Rename { current_name, new_name }, Some(drive)) => {
                drive.rename_file(&current_name, &new_name).await.map_err(|e| e.to_string())
            }
            (Command::Summary { folder_path }, Some(drive)) => match self.summarizer.as_deref() {
                Some(summarizer) => summarizer
                    .summarize_folder(drive, &folder_path)
                    .await
                    .map_err(|e| e.to_string()),
                None => return DRIVE_UNAVAILABLE.to_string(),
            },
            // Already answered by the gate above; kept for exhaustiveness.
            (_, None) => return DRIVE_UNAVAILABLE.to_string(),
        };

        match outcome {
            Ok(text) => text,
            Err(description) => failure_reply(&description),
        }
    }
}
