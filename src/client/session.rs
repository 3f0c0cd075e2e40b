//! Chat session endpoints (`/chat-session`).

use super::core::VoiceChatClient;
use crate::transport::NO_QUERY;
use crate::types::ChatSession;
use crate::Result;
use serde_json::Value;

impl VoiceChatClient {
    /// Create a session for a character and return its chat id
    /// (`<characterId>-<epoch millis>`).
    ///
    /// An envelope whose `data` is not a string (or a body that is not an
    /// envelope at all) yields an empty id rather than an error.
    pub async fn generate_chat_id(&self, character_id: i64) -> Result<String> {
        let envelope = self
            .get_envelope(
                "generate_chat_id",
                &["chat-session", "generateChatId"],
                &[("CharacterId", character_id)],
            )
            .await?;
        match envelope.get("data") {
            Some(Value::String(id)) => Ok(id.clone()),
            _ => {
                tracing::warn!(character_id, payload = %envelope, "generateChatId returned no id");
                Ok(String::new())
            }
        }
    }

    /// List chat sessions, optionally filtered by chat name. An empty name
    /// means no filter.
    pub async fn get_chat_session_list(&self, chat_name: Option<&str>) -> Result<Vec<ChatSession>> {
        let segments = ["chat-session", "getChatSessionList"];
        match chat_name.filter(|n| !n.is_empty()) {
            Some(name) => {
                self.get_typed("get_chat_session_list", &segments, &[("chatName", name)])
                    .await
            }
            None => self.get_typed("get_chat_session_list", &segments, NO_QUERY).await,
        }
    }
}
