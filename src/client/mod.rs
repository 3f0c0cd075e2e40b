//! 客户端模块：后端各接口的异步调用入口。
//!
//! | File | Endpoints |
//! |------|-----------|
//! | `session` | `/chat-session/generateChatId`, `/chat-session/getChatSessionList` |
//! | `chat` | `/ai/chat`, `/ai/voiceChat` |
//! | `history` | `/ai/history/...` |
//! | `characters` | `/character/...` |
//! | `assets` | `/oss/...`, `/chat-session/tts/...` |

mod assets;
mod builder;
mod characters;
mod chat;
mod core;
mod history;
mod session;

pub use builder::VoiceChatClientBuilder;
pub use characters::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use self::core::VoiceChatClient;
