//! # voicechat-client
//!
//! AIVoiceChat 后端的异步 Rust 客户端：会话、文字/语音聊天、历史记录、角色管理与素材接口。
//!
//! Typed async client for the AIVoiceChat backend, a character-based AI chat
//! service with voice replies.
//!
//! ## Overview
//!
//! Each backend endpoint maps to one `async fn` on [`VoiceChatClient`]. The
//! backend wraps payloads in a `{ code, msg, data }` envelope; the client
//! unwraps `data` and decodes it into the types in [`types`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use voicechat_client::{FileUpload, HistoryType, VoiceChatClient};
//!
//! #[tokio::main]
//! async fn main() -> voicechat_client::Result<()> {
//!     let client = VoiceChatClient::new("http://localhost:8080")?;
//!
//!     let chat_id = client.generate_chat_id(3).await?;
//!     let audio = FileUpload::from_path("question.wav").await?;
//!     let reply = client.send_voice_message(&chat_id, &audio, None).await?;
//!     println!("reply audio: {:?}", reply.agent_voice);
//!
//!     for msg in client.get_chat_history(&HistoryType::Chat, &chat_id).await? {
//!         println!("{}: {}", msg.role, msg.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder and per-endpoint operations |
//! | [`config`] | Configuration (YAML file, environment) |
//! | [`types`] | Payload types and the result envelope |
//! | [`transport`] | HTTP transport and error classification |
//! | [`interceptors`] | Request/response hooks |

pub mod client;
pub mod config;
pub mod interceptors;
pub mod transport;
pub mod types;

pub use client::{VoiceChatClient, VoiceChatClientBuilder};
pub use config::ClientConfig;
pub use interceptors::{Interceptor, LoggingInterceptor};
pub use types::{
    Character, ChatSession, EnvelopePolicy, FileUpload, HistoryMessage, HistoryType, Page,
    VoiceRecord, VoiceReply,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
