//! Chat history endpoints (`/ai/history`).

use super::core::VoiceChatClient;
use crate::transport::NO_QUERY;
use crate::types::{HistoryMessage, HistoryType, VoiceRecord};
use crate::Result;

impl VoiceChatClient {
    /// Chat ids recorded under a history bucket, most recent first.
    pub async fn get_chat_history_list(&self, kind: &HistoryType) -> Result<Vec<String>> {
        self.get_typed("get_chat_history_list", &["ai", "history", kind.as_str()], NO_QUERY)
            .await
    }

    /// Messages of one conversation; voice turns appear as `[语音]` user messages.
    pub async fn get_chat_history(
        &self,
        kind: &HistoryType,
        chat_id: &str,
    ) -> Result<Vec<HistoryMessage>> {
        let chat_id = Self::require("chat_id", chat_id)?;
        self.get_typed(
            "get_chat_history",
            &["ai", "history", kind.as_str(), chat_id],
            NO_QUERY,
        )
        .await
    }

    pub async fn get_voice_chat_history(&self, chat_id: &str) -> Result<Vec<VoiceRecord>> {
        let chat_id = Self::require("chat_id", chat_id)?;
        self.get_typed(
            "get_voice_chat_history",
            &["ai", "history", "voice", chat_id],
            NO_QUERY,
        )
        .await
    }
}
