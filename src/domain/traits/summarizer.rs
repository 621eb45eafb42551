use async_trait::async_trait;
use crate::application::errors::SummarizeError;
use super::drive::DriveStorage;

/// Summarizer trait - produces an AI summary of every document in a folder.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize_folder(
        &self,
        drive: &dyn DriveStorage,
        folder_path: &str,
    ) -> Result<String, SummarizeError>;
}
