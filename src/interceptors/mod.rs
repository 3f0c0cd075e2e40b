//! Interceptor hooks around every backend request.
//!
//! Hooks observe; they cannot rewrite requests or responses. The client
//! installs [`LoggingInterceptor`] unless told otherwise.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::Error;

/// Request context passed to interceptors.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Client operation, e.g. `generate_chat_id`.
    pub operation: &'static str,
    pub method: &'static str,
    pub url: String,
}

/// Response context passed to interceptors.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    pub status: u16,
    pub elapsed: Duration,
}

#[async_trait]
pub trait Interceptor: Send + Sync {
    async fn on_request(&self, _ctx: &RequestContext) {}

    async fn on_response(&self, _ctx: &RequestContext, _resp: &ResponseContext, _body: &Value) {}

    async fn on_error(&self, _ctx: &RequestContext, _err: &Error) {}
}

/// Runs hooks in registration order.
#[derive(Clone)]
pub struct InterceptorPipeline {
    pub(crate) interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorPipeline {
    pub fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    pub fn with<I: Interceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn push(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Run hooks around a provided async function that performs the actual call.
    pub async fn execute<F, Fut>(&self, ctx: &RequestContext, f: F) -> Result<Value, Error>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<(ResponseContext, Value), Error>>,
    {
        for ic in &self.interceptors {
            ic.on_request(ctx).await;
        }

        match f().await {
            Ok((resp, body)) => {
                for ic in &self.interceptors {
                    ic.on_response(ctx, &resp, &body).await;
                }
                Ok(body)
            }
            Err(err) => {
                for ic in &self.interceptors {
                    ic.on_error(ctx, &err).await;
                }
                Err(err)
            }
        }
    }
}

impl Default for InterceptorPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Emits a `tracing` event per request, response and failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingInterceptor;

#[async_trait]
impl Interceptor for LoggingInterceptor {
    async fn on_request(&self, ctx: &RequestContext) {
        tracing::debug!(operation = ctx.operation, method = ctx.method, url = %ctx.url, "request sent");
    }

    async fn on_response(&self, ctx: &RequestContext, resp: &ResponseContext, body: &Value) {
        tracing::debug!(
            operation = ctx.operation,
            status = resp.status,
            elapsed_ms = resp.elapsed.as_millis() as u64,
            body = %body,
            "response received"
        );
    }

    async fn on_error(&self, ctx: &RequestContext, err: &Error) {
        tracing::warn!(operation = ctx.operation, url = %ctx.url, error = %err, "request failed");
    }
}
