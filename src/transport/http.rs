use crate::config::ClientConfig;
use crate::interceptors::{InterceptorPipeline, RequestContext, ResponseContext};
use crate::{Error, ErrorContext, Result};
use reqwest::multipart::Form;
use reqwest::{Proxy, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use url::Url;

/// Empty query string.
pub const NO_QUERY: &[(&str, &str)] = &[];

// Error bodies are kept in messages, but not without bound.
const MAX_ERROR_BODY: usize = 512;

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
    interceptors: InterceptorPipeline,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig, interceptors: InterceptorPipeline) -> Result<Self> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new().with_field_path("config.base_url"),
            )
        })?;

        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(concat!("voicechat-client/", env!("CARGO_PKG_VERSION")));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy URL: {}", e),
                    ErrorContext::new().with_field_path("config.proxy_url"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            interceptors,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::configuration("Base URL cannot be used as a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get<Q>(&self, operation: &'static str, segments: &[&str], query: &Q) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let request = self.client.get(url).query(query);
        self.execute(operation, "GET", request).await
    }

    pub async fn post_multipart<Q>(
        &self,
        operation: &'static str,
        segments: &[&str],
        query: &Q,
        form: Form,
    ) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let request = self.client.post(url).query(query).multipart(form);
        self.execute(operation, "POST", request).await
    }

    pub async fn delete<Q>(&self, operation: &'static str, segments: &[&str], query: &Q) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let request = self.client.delete(url).query(query);
        self.execute(operation, "DELETE", request).await
    }

    async fn execute(
        &self,
        operation: &'static str,
        method: &'static str,
        request: RequestBuilder,
    ) -> Result<Value> {
        let request = request.build().map_err(|e| {
            Error::validation_with_context(
                format!("Failed to build request: {}", e),
                ErrorContext::new().with_source(operation),
            )
        })?;
        let ctx = RequestContext {
            operation,
            method,
            url: request.url().to_string(),
        };

        self.interceptors
            .execute(&ctx, || self.send(request))
            .await
    }

    async fn send(&self, request: reqwest::Request) -> Result<(ResponseContext, Value)> {
        let started = Instant::now();
        let response = self.client.execute(request).await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(Error::Remote {
                status: status.as_u16(),
                message: truncate(text.trim(), MAX_ERROR_BODY),
            });
        }
        let resp = ResponseContext {
            status: status.as_u16(),
            elapsed: started.elapsed(),
        };
        Ok((resp, parse_body(&text)))
    }
}

/// Empty bodies become `null`; bodies that are not JSON are kept as a string.
fn parse_body(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request timed out, check the network connection: {0}")]
    Timeout(String),

    #[error("network connection failed, check the network settings: {0}")]
    Connect(String),

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout(e.to_string())
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Http(e)
        }
    }
}
