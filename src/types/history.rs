//! Chat history types.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// History bucket, the `{type}` segment of `/ai/history/{type}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum HistoryType {
    #[default]
    Chat,
    Service,
    Pdf,
    Voice,
    Other(String),
}

impl HistoryType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Chat => "chat",
            Self::Service => "service",
            Self::Pdf => "pdf",
            Self::Voice => "voice",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for HistoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "chat" => Self::Chat,
            "service" => Self::Service,
            "pdf" => Self::Pdf,
            "voice" => Self::Voice,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<&str> for HistoryType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

/// One message of a conversation. Voice exchanges show up here as user
/// messages prefixed with `[语音]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub role: String,
    /// Missing or `null` text reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl HistoryMessage {
    pub const VOICE_PREFIX: &'static str = "[语音]";

    pub fn is_user(&self) -> bool {
        self.role == "user"
    }

    pub fn is_voice(&self) -> bool {
        self.content.starts_with(Self::VOICE_PREFIX)
    }
}

/// Result of a voice chat turn: where the spoken reply and the uploaded
/// prompt audio can be fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceReply {
    #[serde(default)]
    pub agent_voice: Option<String>,
    #[serde(default)]
    pub user_voice: Option<String>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// A stored voice exchange from `/ai/history/voice/{chatId}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceRecord {
    #[serde(flatten)]
    pub reply: VoiceReply,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
