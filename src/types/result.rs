//! Backend result envelope: `{ "code": .., "msg": .., "data": .. }`.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Typed view of the envelope, for callers that want the whole thing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult<T = Value> {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

/// How strictly a result envelope is checked before its `data` is handed out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EnvelopePolicy {
    /// Take `data` when present, ignore `code`.
    #[default]
    Lenient,
    /// Fail when an integer `code` is present and not one of these.
    Strict { success_codes: Vec<i64> },
}

impl EnvelopePolicy {
    pub fn strict(success_codes: impl Into<Vec<i64>>) -> Self {
        Self::Strict {
            success_codes: success_codes.into(),
        }
    }

    pub fn unwrap(&self, value: Value) -> Result<Value> {
        self.check(&value)?;
        Ok(unwrap_data(value))
    }

    /// Apply the code check without touching the value.
    pub fn check(&self, value: &Value) -> Result<()> {
        if let Self::Strict { success_codes } = self {
            if let Some(code) = value.get("code").and_then(Value::as_i64) {
                if !success_codes.contains(&code) {
                    let message = value
                        .get("msg")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    return Err(Error::Api { code, message });
                }
            }
        }
        Ok(())
    }
}

/// Return the `data` member of an object that has one (even if it is null),
/// otherwise the value itself.
pub fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Decode an unwrapped payload into a typed value.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(Error::from)
}

/// Like [`decode`], but a `null` payload yields `T::default()`.
pub fn decode_or_default<T: DeserializeOwned + Default>(value: Value) -> Result<T> {
    if value.is_null() {
        return Ok(T::default());
    }
    decode(value)
}
