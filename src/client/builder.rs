use crate::client::core::VoiceChatClient;
use crate::config::ClientConfig;
use crate::interceptors::{Interceptor, InterceptorPipeline, LoggingInterceptor};
use crate::transport::HttpTransport;
use crate::types::result::EnvelopePolicy;
use crate::Result;
use std::sync::Arc;

/// Builder for [`VoiceChatClient`].
///
/// Starts from [`ClientConfig::default`]; environment overrides are only
/// applied when starting from [`VoiceChatClientBuilder::from_env`].
pub struct VoiceChatClientBuilder {
    config: ClientConfig,
    interceptors: InterceptorPipeline,
    default_logging: bool,
}

impl VoiceChatClientBuilder {
    pub fn new() -> Self {
        Self::from_config(ClientConfig::default())
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            config,
            interceptors: InterceptorPipeline::new(),
            default_logging: true,
        }
    }

    pub fn from_env() -> Self {
        Self::from_config(ClientConfig::from_env())
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(url.into());
        self
    }

    pub fn pool_max_idle_per_host(mut self, n: usize) -> Self {
        self.config.pool_max_idle_per_host = n;
        self
    }

    /// Fail on result envelopes whose `code` is not a success code.
    pub fn strict_envelope(mut self, enable: bool) -> Self {
        self.config.strict_envelope = enable;
        self
    }

    pub fn success_codes(mut self, codes: impl Into<Vec<i64>>) -> Self {
        self.config.success_codes = codes.into();
        self
    }

    /// Resend a failed voice request once (enabled by default).
    pub fn voice_fallback(mut self, enable: bool) -> Self {
        self.config.voice_fallback = enable;
        self
    }

    pub fn interceptor<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors = self.interceptors.with(interceptor);
        self
    }

    pub fn shared_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Drop the built-in [`LoggingInterceptor`].
    pub fn without_default_logging(mut self) -> Self {
        self.default_logging = false;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build(self) -> Result<VoiceChatClient> {
        let mut pipeline = InterceptorPipeline::new();
        if self.default_logging {
            pipeline = pipeline.with(LoggingInterceptor);
        }
        for ic in self.interceptors.interceptors {
            pipeline.push(ic);
        }

        let transport = HttpTransport::new(&self.config, pipeline)?;
        let envelope = if self.config.strict_envelope {
            EnvelopePolicy::strict(self.config.success_codes.clone())
        } else {
            EnvelopePolicy::Lenient
        };

        tracing::debug!(
            base_url = %self.config.base_url,
            timeout_secs = self.config.timeout_secs,
            strict_envelope = self.config.strict_envelope,
            "voicechat client ready"
        );

        Ok(VoiceChatClient {
            transport: Arc::new(transport),
            envelope,
            voice_fallback: self.config.voice_fallback,
        })
    }
}

impl Default for VoiceChatClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
