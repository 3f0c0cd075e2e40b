use serde::{Deserialize, Serialize};

/// A chat session row. `chat_name` is the identifier handed out by
/// `generateChatId` and used as `chatId` everywhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    #[serde(default)]
    pub chat_id: Option<i64>,
    #[serde(default)]
    pub chat_name: Option<String>,
    #[serde(default)]
    pub character_id: Option<i64>,
    /// Creation time as rendered by the backend (spelled `creatTime` on the wire).
    #[serde(rename = "creatTime", default)]
    pub created_at: Option<String>,
}

/// Session identifiers are `<characterId>-<epoch millis>`.
pub fn character_id_of(chat_id: &str) -> Option<i64> {
    let (prefix, _) = chat_id.split_once('-')?;
    prefix.parse().ok()
}
