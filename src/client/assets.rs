//! Object storage uploads and the TTS model/voice catalogue.

use super::core::VoiceChatClient;
use crate::transport::NO_QUERY;
use crate::types::FileUpload;
use crate::{Error, ErrorContext, Result};
use reqwest::multipart::Form;
use serde_json::Value;

impl VoiceChatClient {
    /// Upload a file to object storage and return its public URL.
    pub async fn upload_file(&self, file: &FileUpload) -> Result<String> {
        let form = Form::new().part("file", file.to_part()?);
        let data = self
            .post_form_data("upload_file", &["oss", "upload"], NO_QUERY, form)
            .await?;
        match data {
            Value::String(url) => Ok(url),
            other => Err(Error::validation_with_context(
                "upload did not return a URL",
                ErrorContext::new()
                    .with_details(other.to_string())
                    .with_source("upload_file"),
            )),
        }
    }

    /// Same endpoint as [`VoiceChatClient::upload_file`].
    pub async fn upload_to_oss(&self, file: &FileUpload) -> Result<String> {
        self.upload_file(file).await
    }

    /// Remove a previously uploaded file by URL.
    pub async fn delete_file(&self, file_url: &str) -> Result<Value> {
        let file_url = Self::require("file_url", file_url)?;
        self.delete_data("delete_file", &["oss", "delete"], &[("fileUrl", file_url)])
            .await
    }

    /// Available TTS models, passed through as returned by the TTS provider.
    pub async fn get_tts_models(&self) -> Result<Value> {
        self.get_data("get_tts_models", &["chat-session", "tts", "models"], NO_QUERY)
            .await
    }

    /// Voices offered by one TTS model.
    pub async fn get_voices_by_model(&self, model: &str) -> Result<Value> {
        let model = Self::require("model", model)?;
        self.get_data(
            "get_voices_by_model",
            &["chat-session", "tts", "voices", model],
            NO_QUERY,
        )
        .await
    }
}
