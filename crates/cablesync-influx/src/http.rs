//! HTTP backend abstraction for the InfluxDB API.
//!
//! The backend performs exactly one attempt per call. Retries with
//! exponential backoff are layered on top by [`send_with_retry`], so the
//! same policy applies to the production reqwest backend and to the fake
//! used in tests.

use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use crate::config::InfluxConfig;
use crate::error::{InfluxError, InfluxResult};

// ============================================================================
// Request / Response
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully built request, independent of the HTTP client.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub const fn get(url: Url) -> Self {
        Self {
            method: Method::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    pub const fn post(url: Url, body: String) -> Self {
        Self {
            method: Method::Post,
            url,
            headers: Vec::new(),
            body: Some(body),
        }
    }

    #[must_use]
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Value of the first header called `name`.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can execute a single request.
///
/// Non-2xx statuses are returned as `Ok`; only transport failures are
/// errors at this level.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> InfluxResult<HttpResponse>;
}

// ============================================================================
// Retry
// ============================================================================

/// Retry settings for transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u8,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based): `base * 2^(attempt-1)`.
    pub fn delay(&self, attempt: u8) -> Duration {
        let factor = 2u32.saturating_pow(u32::from(attempt.saturating_sub(1)));
        self.base_delay.saturating_mul(factor)
    }
}

/// Send `request`, retrying 5xx responses and network errors.
///
/// 4xx responses fail immediately with the status and the server's message.
pub async fn send_with_retry<B: HttpBackend + ?Sized>(
    backend: &B,
    request: &HttpRequest,
    policy: RetryPolicy,
) -> InfluxResult<HttpResponse> {
    let mut last_error: Option<InfluxError> = None;

    for attempt in 0..=policy.max_retries {
        if attempt > 0 {
            let delay = policy.delay(attempt);
            tracing::warn!(
                attempt,
                max_retries = policy.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                path = request.url.path(),
                "Retrying InfluxDB request"
            );
            tokio::time::sleep(delay).await;
        }

        let error = match backend.send(request).await {
            Ok(response) if response.is_success() => return Ok(response),
            Ok(response) => InfluxError::ApiRequestFailed {
                status: response.status,
                message: error_message(&response.body),
            },
            Err(e) => e,
        };

        if !error.is_transient() || attempt == policy.max_retries {
            return Err(error);
        }
        last_error = Some(error);
    }

    Err(last_error.unwrap_or_else(|| InfluxError::InvalidResponse {
        message: "Unknown error during request".to_string(),
    }))
}

/// Pull the `message` out of an InfluxDB JSON error body, falling back to
/// the raw text.
pub fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no response body".to_string();
    }
    serde_json::from_str::<serde_json::Value>(trimmed)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| trimmed.to_string())
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &InfluxConfig) -> InfluxResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: &HttpRequest) -> InfluxResult<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(request.url.as_str()),
            Method::Post => self.client.post(request.url.as_str()),
        };
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::testing::FakeBackend;
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest::get(Url::parse("http://localhost:8086/health").unwrap())
    }

    fn policy(max_retries: u8) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        };
        assert_eq!(policy.delay(1), Duration::from_millis(500));
        assert_eq!(policy.delay(2), Duration::from_millis(1000));
        assert_eq!(policy.delay(3), Duration::from_millis(2000));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"code":"unauthorized","message":"unauthorized access"}"#),
            "unauthorized access"
        );
        assert_eq!(error_message("plain failure\n"), "plain failure");
        assert_eq!(error_message(""), "no response body");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = request().header("Authorization", "Token abc");
        assert_eq!(req.header_value("authorization"), Some("Token abc"));
        assert_eq!(req.header_value("Accept"), None);
    }

    #[tokio::test]
    async fn test_success_first_try() {
        let backend = FakeBackend::new().with_status(200, "ok");
        let response = send_with_retry(&backend, &request(), policy(3)).await.unwrap();
        assert_eq!(response.body, "ok");
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let backend = FakeBackend::new()
            .with_status(503, "busy")
            .with_network_error("connection reset")
            .with_status(204, "");
        let response = send_with_retry(&backend, &request(), policy(3)).await.unwrap();
        assert_eq!(response.status, 204);
        assert_eq!(backend.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_retries_exhausted() {
        let backend = FakeBackend::new()
            .with_status(500, "a")
            .with_status(500, "b")
            .with_status(500, "c")
            .with_status(500, "d");
        let err = send_with_retry(&backend, &request(), policy(3))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InfluxError::ApiRequestFailed { status: 500, ref message } if message == "d"
        ));
        assert_eq!(backend.requests().len(), 4);
    }

    #[tokio::test]
    async fn test_client_errors_fail_immediately() {
        let backend = FakeBackend::new()
            .with_status(400, r#"{"message":"bad line protocol"}"#)
            .with_status(204, "");
        let err = send_with_retry(&backend, &request(), policy(3))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            InfluxError::ApiRequestFailed { status: 400, ref message } if message == "bad line protocol"
        ));
        assert_eq!(backend.requests().len(), 1);
    }

    #[test]
    fn test_reqwest_backend_creation() {
        assert!(ReqwestBackend::new(&InfluxConfig::default()).is_ok());
    }
}
