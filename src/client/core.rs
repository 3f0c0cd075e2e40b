use crate::config::ClientConfig;
use crate::transport::HttpTransport;
use crate::types::result::{self, EnvelopePolicy};
use crate::{Error, ErrorContext, Result};
use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::builder::VoiceChatClientBuilder;

/// Client for the AIVoiceChat backend.
///
/// Every operation is a single request; the only resend is the voice
/// fallback (see [`VoiceChatClient::send_voice_message`]). Cloning shares the
/// underlying connection pool.
#[derive(Clone)]
pub struct VoiceChatClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) envelope: EnvelopePolicy,
    pub(crate) voice_fallback: bool,
}

impl VoiceChatClient {
    pub fn builder() -> VoiceChatClientBuilder {
        VoiceChatClientBuilder::new()
    }

    /// Client with default settings against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        VoiceChatClientBuilder::from_config(config).build()
    }

    /// Client configured from `VOICECHAT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url().as_str()
    }

    pub fn envelope_policy(&self) -> &EnvelopePolicy {
        &self.envelope
    }

    /// Reject blank identifiers before they turn into a different endpoint.
    pub(crate) fn require<'a>(field: &str, value: &'a str) -> Result<&'a str> {
        if value.trim().is_empty() {
            return Err(Error::validation_with_context(
                format!("{} must not be empty", field),
                ErrorContext::new().with_field_path(field),
            ));
        }
        Ok(value)
    }

    pub(crate) async fn get_data<Q>(
        &self,
        operation: &'static str,
        segments: &[&str],
        query: &Q,
    ) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let raw = self.transport.get(operation, segments, query).await?;
        self.envelope.unwrap(raw)
    }

    /// Like [`get_data`](Self::get_data) but hands back the whole envelope.
    pub(crate) async fn get_envelope<Q>(
        &self,
        operation: &'static str,
        segments: &[&str],
        query: &Q,
    ) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let raw = self.transport.get(operation, segments, query).await?;
        self.envelope.check(&raw)?;
        Ok(raw)
    }

    pub(crate) async fn get_typed<T, Q>(
        &self,
        operation: &'static str,
        segments: &[&str],
        query: &Q,
    ) -> Result<T>
    where
        T: DeserializeOwned + Default,
        Q: Serialize + ?Sized,
    {
        let data = self.get_data(operation, segments, query).await?;
        result::decode_or_default(data)
    }

    pub(crate) async fn post_form_data<Q>(
        &self,
        operation: &'static str,
        segments: &[&str],
        query: &Q,
        form: Form,
    ) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let raw = self
            .transport
            .post_multipart(operation, segments, query, form)
            .await?;
        self.envelope.unwrap(raw)
    }

    pub(crate) async fn delete_data<Q>(
        &self,
        operation: &'static str,
        segments: &[&str],
        query: &Q,
    ) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let raw = self.transport.delete(operation, segments, query).await?;
        self.envelope.unwrap(raw)
    }
}

impl std::fmt::Debug for VoiceChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceChatClient")
            .field("base_url", &self.base_url())
            .field("envelope", &self.envelope)
            .field("voice_fallback", &self.voice_fallback)
            .finish()
    }
}
