//! 类型模块：后端接口的请求与响应数据类型。
//!
//! # Types Module
//!
//! Strongly-typed views of the payloads exchanged with the backend. Field
//! names follow the wire format (camelCase, including the backend's own
//! spellings such as `promt` and `creatTime`) through serde attributes.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`result`] | `{ code, msg, data }` envelope and unwrapping policy |
//! | [`character`] | Characters and paged listings |
//! | [`session`] | Chat sessions |
//! | [`history`] | Chat and voice history, voice replies |
//! | [`file`] | Files attached to multipart requests |

pub mod character;
pub mod file;
pub mod history;
pub mod result;
pub mod session;

pub use character::{Character, Page};
pub use file::FileUpload;
pub use history::{HistoryMessage, HistoryType, VoiceRecord, VoiceReply};
pub use result::{ApiResult, EnvelopePolicy};
pub use session::ChatSession;
