//! Folder summarizer - one AI summary block per document in a folder

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::SummarizeError;
use crate::domain::entities::RemoteFile;
use crate::domain::traits::{DriveStorage, Summarizer};
use crate::infrastructure::ai::{AiConfig, ChatMessage, Llm};

const SYSTEM_PROMPT: &str = "You are a helpful assistant that provides concise summaries.";

/// Summarizes every document in a Drive folder with an LLM.
///
/// Extraction is per-MIME: plain text is downloaded and decoded, Google-native
/// documents are fetched through the text export endpoint, everything else
/// gets an unsupported notice. One file failing never aborts the folder.
pub struct DocumentSummarizer {
    llm: Arc<dyn Llm>,
    temperature: f32,
    max_tokens: u32,
    summary_max_chars: usize,
    input_max_chars: usize,
}

impl DocumentSummarizer {
    pub fn new(llm: Arc<dyn Llm>, config: &AiConfig) -> Self {
        Self {
            llm,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            summary_max_chars: config.summary_max_chars,
            input_max_chars: config.input_max_chars,
        }
    }

    /// Pull displayable text out of one Drive entry.
    async fn extract_text(&self, drive: &dyn DriveStorage, file: &RemoteFile) -> Extracted {
        match file.mime_type.as_str() {
            "text/plain" => match drive.download_file(&file.id).await {
                Ok(bytes) => Extracted::Text(String::from_utf8_lossy(&bytes).into_owned()),
                Err(e) => Extracted::Note(format!("Error reading file: {}", e)),
            },
            RemoteFile::GOOGLE_DOC_MIME => match drive.export_text(&file.id).await {
                Ok(text) => Extracted::Text(text),
                Err(e) => Extracted::Note(format!("Error reading file: {}", e)),
            },
            other => Extracted::Note(format!(
                "File type not supported for summarization: {}",
                other
            )),
        }
    }

    async fn summarize_content(&self, text: &str) -> String {
        let bounded = truncate_chars(text, self.input_max_chars);
        let prompt = format!(
            "Please provide a concise summary of the following content. \
             Focus on key points and main ideas. Limit to {} characters:\n\n{}",
            self.summary_max_chars, bounded
        );

        let messages = vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)];

        match self
            .llm
            .chat(messages, Some(self.temperature), Some(self.max_tokens))
            .await
        {
            Ok(summary) => truncate_chars(summary.trim(), self.summary_max_chars).to_string(),
            Err(e) => format!("Error generating summary: {}", e),
        }
    }
}

enum Extracted {
    Text(String),
    Note(String),
}

#[async_trait]
impl Summarizer for DocumentSummarizer {
    async fn summarize_folder(
        &self,
        drive: &dyn DriveStorage,
        folder_path: &str,
    ) -> Result<String, SummarizeError> {
        let files = drive.list_folder(folder_path).await?;
        if files.is_empty() {
            return Ok("No files found in this folder to summarize.".to_string());
        }

        tracing::info!(folder = folder_path, files = files.len(), "summarizing folder");

        let mut response = format!("📊 Summary of files in '{}':\n\n", folder_path);
        for file in &files {
            let block = match self.extract_text(drive, file).await {
                Extracted::Text(text) if !text.trim().is_empty() => {
                    self.summarize_content(&text).await
                }
                Extracted::Text(_) => "File is empty.".to_string(),
                Extracted::Note(note) => note,
            };
            response.push_str(&format!("📄 *{}:*\n{}\n\n", file.name, block));
        }

        Ok(response)
    }
}

/// Truncate on a character boundary.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
