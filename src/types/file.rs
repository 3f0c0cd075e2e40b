//! Files attached to multipart requests (chat attachments, voice prompts, uploads).

use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use std::path::Path;

const DEFAULT_MIME: &str = "application/octet-stream";

/// An in-memory file. Cloning is cheap, which lets a failed request be rebuilt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub data: Bytes,
    pub file_name: String,
    pub mime: String,
}

impl FileUpload {
    /// Wrap raw bytes; the MIME type is guessed from the file name.
    pub fn new(data: impl Into<Bytes>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let mime = guess_mime(&file_name).unwrap_or(DEFAULT_MIME).to_string();
        Self {
            data: data.into(),
            file_name,
            mime,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                Error::validation_with_context(
                    "Upload path has no usable file name",
                    ErrorContext::new()
                        .with_details(path.display().to_string())
                        .with_source("file_upload"),
                )
            })?
            .to_string();
        let data = tokio::fs::read(path).await?;
        Ok(Self::new(data, file_name))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub(crate) fn to_part(&self) -> Result<reqwest::multipart::Part> {
        reqwest::multipart::Part::bytes(self.data.to_vec())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime)
            .map_err(|e| {
                Error::validation_with_context(
                    format!("Invalid mime: {}", e),
                    ErrorContext::new()
                        .with_details(self.mime.clone())
                        .with_source("file_upload"),
                )
            })
    }
}

fn guess_mime(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    let mt = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "webm" => "audio/webm",
        "m4a" => "audio/mp4",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => return None,
    };
    Some(mt)
}
