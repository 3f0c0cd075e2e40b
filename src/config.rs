//! 客户端配置：后端地址、超时、代理与结果包络校验策略。
//!
//! Client configuration, loadable from YAML and overridable from the environment.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `VOICECHAT_API_BASE_URL` | `base_url` |
//! | `VOICECHAT_HTTP_TIMEOUT_SECS` | `timeout_secs` |
//! | `VOICECHAT_PROXY_URL` | `proxy_url` |
//! | `VOICECHAT_STRICT_ENVELOPE` | `strict_envelope` |

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable naming a YAML config file (read by the CLI).
pub const CONFIG_PATH_ENV: &str = "VOICECHAT_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub proxy_url: Option<String>,
    pub pool_max_idle_per_host: usize,
    /// Reject result envelopes whose `code` is not in `success_codes`.
    pub strict_envelope: bool,
    pub success_codes: Vec<i64>,
    /// Resend a failed voice request once.
    pub voice_fallback: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            proxy_url: None,
            pool_max_idle_per_host: 32,
            strict_envelope: false,
            success_codes: vec![1, 200],
            voice_fallback: true,
        }
    }
}

impl ClientConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid config: {}", e),
                ErrorContext::new().with_source("config"),
            )
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration_with_context(
                format!("Failed to read config file: {}", e),
                ErrorContext::new()
                    .with_details(path.display().to_string())
                    .with_source("config"),
            )
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn apply_env(self) -> Self {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup. Unparseable values are ignored.
    pub fn apply_env_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("VOICECHAT_API_BASE_URL").filter(|s| !s.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(secs) = lookup("VOICECHAT_HTTP_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.timeout_secs = secs;
        }
        if let Some(proxy) = lookup("VOICECHAT_PROXY_URL").filter(|s| !s.trim().is_empty()) {
            self.proxy_url = Some(proxy);
        }
        if let Some(flag) = lookup("VOICECHAT_STRICT_ENVELOPE") {
            self.strict_envelope = matches!(flag.trim(), "1" | "true" | "TRUE" | "yes");
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("config.base_url")
                    .with_details(self.base_url.clone()),
            )
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::configuration_with_context(
                "Base URL must use http or https",
                ErrorContext::new()
                    .with_field_path("config.base_url")
                    .with_details(self.base_url.clone()),
            ));
        }
        if url.cannot_be_a_base() {
            return Err(Error::configuration_with_context(
                "Base URL cannot be used as a base",
                ErrorContext::new().with_field_path("config.base_url"),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::configuration_with_context(
                "Timeout must be greater than zero",
                ErrorContext::new().with_field_path("config.timeout_secs"),
            ));
        }
        Ok(())
    }
}
