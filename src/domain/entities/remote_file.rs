/// One entry in a Drive folder listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    pub size: Option<u64>,
    pub modified_time: Option<String>,
}

impl RemoteFile {
    pub const FOLDER_MIME: &'static str = "application/vnd.google-apps.folder";
    pub const GOOGLE_DOC_MIME: &'static str = "application/vnd.google-apps.document";

    pub fn new(id: impl Into<String>, name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mime_type: mime_type.into(),
            size: None,
            modified_time: None,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.mime_type == Self::FOLDER_MIME
    }
}
