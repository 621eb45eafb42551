/// A parsed user command.
///
/// Every inbound text maps to exactly one variant; inputs that match no
/// grammar rule become `Unknown`, so callers never deal with a parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `LIST <folder>` - list files in a Drive folder
    List { folder_path: String },
    /// `DELETE <path>` - delete a file or folder
    Delete { file_path: String },
    /// `MOVE <source> <dest-folder>` - move a file to another folder
    Move { source_path: String, dest_path: String },
    /// `RENAME <current> <new>` - rename a file
    Rename { current_name: String, new_name: String },
    /// `SUMMARY <folder>` - AI summary of all documents in a folder
    Summary { folder_path: String },
    /// `UPLOAD <folder> <name>` - text-only upload instruction; the binary
    /// content arrives as a document message with this line as its caption
    UploadText { folder_path: String, file_name: String },
    /// `HELP`
    Help,
    /// Anything that matched no rule; carries the trimmed original text
    Unknown { raw: String },
}

impl Command {
    /// Commands that cannot run without the Drive integration.
    pub fn requires_drive(&self) -> bool {
        !matches!(self, Command::Help | Command::Unknown { .. })
    }

    /// The keyword this command was parsed from, for logging.
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::List { .. } => "LIST",
            Command::Delete { .. } => "DELETE",
            Command::Move { .. } => "MOVE",
            Command::Rename { .. } => "RENAME",
            Command::Summary { .. } => "SUMMARY",
            Command::UploadText { .. } => "UPLOAD",
            Command::Help => "HELP",
            Command::Unknown { .. } => "UNKNOWN",
        }
    }
}
