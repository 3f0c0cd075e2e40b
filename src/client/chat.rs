//! Text and voice chat (`/ai/chat`, `/ai/voiceChat`).

use super::core::VoiceChatClient;
use crate::types::result;
use crate::types::{FileUpload, VoiceReply};
use crate::Result;
use reqwest::multipart::Form;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatQuery<'a> {
    prompt: &'a str,
    chat_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceQuery<'a> {
    chat_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
}

impl VoiceChatClient {
    /// Send a text prompt with optional attachments (one `files` part each).
    pub async fn send_message(
        &self,
        prompt: &str,
        chat_id: &str,
        files: &[FileUpload],
    ) -> Result<Value> {
        let chat_id = Self::require("chat_id", chat_id)?;
        let mut form = Form::new();
        for file in files {
            form = form.part("files", file.to_part()?);
        }
        self.post_form_data(
            "send_message",
            &["ai", "chat"],
            &ChatQuery { prompt, chat_id },
            form,
        )
        .await
    }

    /// Send recorded audio as the prompt and get back the spoken reply.
    ///
    /// When the first attempt fails and the voice fallback is enabled, the
    /// request is rebuilt and sent once more; that outcome is final.
    pub async fn send_voice_message(
        &self,
        chat_id: &str,
        audio: &FileUpload,
        path: Option<&str>,
    ) -> Result<VoiceReply> {
        let chat_id = Self::require("chat_id", chat_id)?;
        let query = VoiceQuery { chat_id, path };
        tracing::debug!(
            chat_id,
            audio_size = audio.len(),
            audio_name = %audio.file_name,
            audio_type = %audio.mime,
            "sending voice chat request"
        );

        match self.voice_attempt(&query, audio).await {
            Ok(reply) => Ok(reply),
            Err(e) if self.voice_fallback => {
                tracing::warn!(chat_id, error = %e, "voice chat request failed, resending once");
                self.voice_attempt(&query, audio).await
            }
            Err(e) => Err(e),
        }
    }

    /// One request plus decoding; an undecodable reply counts as a failed attempt.
    async fn voice_attempt(&self, query: &VoiceQuery<'_>, audio: &FileUpload) -> Result<VoiceReply> {
        let form = Form::new().part("prompt", audio.to_part()?);
        let data = self
            .post_form_data("send_voice_message", &["ai", "voiceChat"], query, form)
            .await?;
        result::decode_or_default(data)
    }
}
