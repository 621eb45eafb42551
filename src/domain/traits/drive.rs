use async_trait::async_trait;
use crate::application::errors::DriveError;
use crate::domain::entities::RemoteFile;

/// DriveStorage trait - the file-storage operations the bot needs.
///
/// The user-facing operations return display-ready text; a lookup that
/// matches nothing is a normal reply ("not found"), not an error. `Err` is
/// reserved for auth, network and API failures.
#[async_trait]
pub trait DriveStorage: Send + Sync {
    /// List files in a folder, formatted for display.
    async fn list_files(&self, folder_path: &str) -> Result<String, DriveError>;

    /// Delete a file or folder by path.
    async fn delete_file(&self, file_path: &str) -> Result<String, DriveError>;

    /// Move a file into another folder.
    async fn move_file(&self, source_path: &str, dest_folder: &str) -> Result<String, DriveError>;

    /// Rename a file found by name.
    async fn rename_file(&self, current_name: &str, new_name: &str) -> Result<String, DriveError>;

    /// Upload raw bytes as a new file in a folder.
    async fn upload_file(
        &self,
        folder_path: &str,
        file_name: &str,
        content: &[u8],
        mime_type: &str,
    ) -> Result<String, DriveError>;

    /// Resolve a `/`-delimited folder path to a provider id, creating
    /// intermediate folders that do not exist.
    async fn resolve_folder_id(&self, folder_path: &str) -> Result<String, DriveError>;

    /// Enumerate a folder as structured entries (used by the summarizer).
    async fn list_folder(&self, folder_path: &str) -> Result<Vec<RemoteFile>, DriveError>;

    /// Download a file's raw content.
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, DriveError>;

    /// Export a Google-native document as plain text.
    async fn export_text(&self, file_id: &str) -> Result<String, DriveError>;
}
