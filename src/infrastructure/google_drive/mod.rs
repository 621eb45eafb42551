//! Google Drive collaborator - Drive REST v3 over reqwest

pub mod auth;

pub use auth::ServiceAccountAuth;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;

use crate::application::errors::DriveError;
use crate::domain::entities::RemoteFile;
use crate::domain::traits::DriveStorage;

const API_BASE: &str = "https://www.googleapis.com/drive/v3";
const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart";

/// One file resource as the Drive API returns it.
#[derive(Debug, Clone, Deserialize)]
struct FileResource {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "mimeType", default)]
    mime_type: String,
    /// Drive serializes sizes as strings
    #[serde(default)]
    size: Option<String>,
    #[serde(rename = "modifiedTime", default)]
    modified_time: Option<String>,
    #[serde(default)]
    parents: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileResource>,
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: String,
}

/// Drive REST client implementing the storage capability.
pub struct DriveClient {
    auth: ServiceAccountAuth,
    client: Client,
}

impl DriveClient {
    pub fn new(auth: ServiceAccountAuth) -> Self {
        Self { auth, client: Client::new() }
    }

    async fn bearer(&self) -> Result<String, DriveError> {
        self.auth.access_token().await
    }

    /// Escape single quotes for use inside a Drive query string.
    fn escape(name: &str) -> String {
        name.replace('\'', "\\'")
    }

    /// Split a path into its parent folder path and final component.
    fn split_parent(path: &str) -> (String, String) {
        match path.rfind('/') {
            Some(idx) => {
                let folder = if idx == 0 { "/" } else { &path[..idx] };
                (folder.to_string(), path[idx + 1..].to_string())
            }
            None => ("/".to_string(), path.to_string()),
        }
    }

    async fn check(response: Response) -> Result<Response, DriveError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(DriveError::Api { status, body })
    }

    /// Run a files.list query.
    async fn query_files(&self, q: &str, fields: &str) -> Result<Vec<FileResource>, DriveError> {
        let token = self.bearer().await?;
        let response = self
            .client
            .get(format!("{}/files", API_BASE))
            .bearer_auth(token)
            .query(&[("q", q), ("spaces", "drive"), ("fields", fields), ("orderBy", "name")])
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;

        let list: FileList = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| DriveError::Parse(e.to_string()))?;
        Ok(list.files)
    }

    /// Find a file by name inside a folder. Name collisions are resolved
    /// provider-side; the first match wins.
    async fn find_in_folder(
        &self,
        name: &str,
        folder_id: &str,
        fields: &str,
    ) -> Result<Option<FileResource>, DriveError> {
        let q = format!(
            "name='{}' and '{}' in parents and trashed=false",
            Self::escape(name),
            folder_id
        );
        Ok(self.query_files(&q, fields).await?.into_iter().next())
    }

    async fn create_folder(&self, name: &str, parent_id: &str) -> Result<String, DriveError> {
        let token = self.bearer().await?;
        let body = serde_json::json!({
            "name": name,
            "mimeType": RemoteFile::FOLDER_MIME,
            "parents": [parent_id],
        });
        let response = self
            .client
            .post(format!("{}/files", API_BASE))
            .bearer_auth(token)
            .query(&[("fields", "id")])
            .json(&body)
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;

        let created: CreatedFile = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| DriveError::Parse(e.to_string()))?;
        Ok(created.id)
    }
}

#[async_trait]
impl DriveStorage for DriveClient {
    async fn resolve_folder_id(&self, folder_path: &str) -> Result<String, DriveError> {
        let segments: Vec<&str> = folder_path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        if segments.is_empty() {
            return Ok("root".to_string());
        }

        let mut current_id = "root".to_string();
        for segment in segments {
            let q = format!(
                "name='{}' and mimeType='{}' and '{}' in parents and trashed=false",
                Self::escape(segment),
                RemoteFile::FOLDER_MIME,
                current_id
            );
            let items = self.query_files(&q, "files(id, name)").await?;
            current_id = match items.into_iter().next() {
                Some(folder) => folder.id,
                // Missing intermediate folders are created on the fly.
                None => self.create_folder(segment, &current_id).await?,
            };
        }
        Ok(current_id)
    }

    async fn list_files(&self, folder_path: &str) -> Result<String, DriveError> {
        let folder_id = self.resolve_folder_id(folder_path).await?;
        let q = format!("'{}' in parents and trashed=false", folder_id);
        let files = self
            .query_files(&q, "files(id, name, mimeType, size, modifiedTime)")
            .await?;

        if files.is_empty() {
            return Ok("No files found in this folder.".to_string());
        }

        let mut response = format!("Files in '{}':\n", folder_path);
        for file in files {
            let marker = if file.mime_type == RemoteFile::FOLDER_MIME { "📁" } else { "📄" };
            response.push_str(&format!("{} {}\n", marker, file.name));
        }
        Ok(response)
    }

    async fn list_folder(&self, folder_path: &str) -> Result<Vec<RemoteFile>, DriveError> {
        let folder_id = self.resolve_folder_id(folder_path).await?;
        let q = format!("'{}' in parents and trashed=false", folder_id);
        let files = self
            .query_files(&q, "files(id, name, mimeType, size, modifiedTime)")
            .await?;

        Ok(files
            .into_iter()
            .map(|f| RemoteFile {
                id: f.id,
                name: f.name,
                mime_type: f.mime_type,
                size: f.size.and_then(|s| s.parse().ok()),
                modified_time: f.modified_time,
            })
            .collect())
    }

    async fn delete_file(&self, file_path: &str) -> Result<String, DriveError> {
        let (folder_path, file_name) = Self::split_parent(file_path);
        let folder_id = self.resolve_folder_id(&folder_path).await?;

        let Some(file) = self.find_in_folder(&file_name, &folder_id, "files(id)").await? else {
            return Ok(format!("File '{}' not found.", file_path));
        };

        let token = self.bearer().await?;
        let response = self
            .client
            .delete(format!("{}/files/{}", API_BASE, file.id))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;
        Self::check(response).await?;

        Ok(format!("✅ Successfully deleted '{}'", file_path))
    }

    async fn move_file(&self, source_path: &str, dest_folder: &str) -> Result<String, DriveError> {
        let (source_folder, file_name) = Self::split_parent(source_path);
        let source_folder_id = self.resolve_folder_id(&source_folder).await?;

        let Some(file) = self
            .find_in_folder(&file_name, &source_folder_id, "files(id, parents)")
            .await?
        else {
            return Ok(format!("File '{}' not found.", source_path));
        };

        let dest_folder_id = self.resolve_folder_id(dest_folder).await?;
        let previous_parents = file.parents.unwrap_or_default().join(",");

        let token = self.bearer().await?;
        let response = self
            .client
            .patch(format!("{}/files/{}", API_BASE, file.id))
            .bearer_auth(token)
            .query(&[
                ("addParents", dest_folder_id.as_str()),
                ("removeParents", previous_parents.as_str()),
                ("fields", "id, parents"),
            ])
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;
        Self::check(response).await?;

        Ok(format!("✅ Successfully moved '{}' to '{}'", file_name, dest_folder))
    }

    async fn rename_file(&self, current_name: &str, new_name: &str) -> Result<String, DriveError> {
        // Lookup is by name anywhere in the drive, matching the command's
        // name-only arguments.
        let q = format!("name='{}' and trashed=false", Self::escape(current_name));
        let Some(file) = self.query_files(&q, "files(id)").await?.into_iter().next() else {
            return Ok(format!("File '{}' not found.", current_name));
        };

        let token = self.bearer().await?;
        let response = self
            .client
            .patch(format!("{}/files/{}", API_BASE, file.id))
            .bearer_auth(token)
            .json(&serde_json::json!({ "name": new_name }))
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;
        Self::check(response).await?;

        Ok(format!("✅ Successfully renamed '{}' to '{}'", current_name, new_name))
    }

    async fn upload_file(
        &self,
        folder_path: &str,
        file_name: &str,
        content: &[u8],
        mime_type: &str,
    ) -> Result<String, DriveError> {
        let folder_id = self.resolve_folder_id(folder_path).await?;
        let metadata = serde_json::json!({ "name": file_name, "parents": [folder_id] });

        // Drive expects multipart/related: a JSON metadata part followed by
        // the media part.
        let boundary = "arsip_bot_upload";
        let mut body = Vec::with_capacity(content.len() + 512);
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("--{boundary}\r\nContent-Type: {mime_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--").as_bytes());

        let token = self.bearer().await?;
        let response = self
            .client
            .post(UPLOAD_URL)
            .bearer_auth(token)
            .header("Content-Type", format!("multipart/related; boundary={boundary}"))
            .body(body)
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;
        Self::check(response).await?;

        Ok(format!("✅ Successfully uploaded '{}' to '{}'", file_name, folder_path))
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, DriveError> {
        let token = self.bearer().await?;
        let response = self
            .client
            .get(format!("{}/files/{}", API_BASE, file_id))
            .bearer_auth(token)
            .query(&[("alt", "media")])
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;

        let bytes = Self::check(response)
            .await?
            .bytes()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn export_text(&self, file_id: &str) -> Result<String, DriveError> {
        let token = self.bearer().await?;
        let response = self
            .client
            .get(format!("{}/files/{}/export", API_BASE, file_id))
            .bearer_auth(token)
            .query(&[("mimeType", "text/plain")])
            .send()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))?;

        Self::check(response)
            .await?
            .text()
            .await
            .map_err(|e| DriveError::Network(e.to_string()))
    }
}
