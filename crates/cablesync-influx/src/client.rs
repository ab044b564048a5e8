//! InfluxDB client shared by the write and query paths.

use url::Url;

use crate::config::InfluxConfig;
use crate::error::{InfluxError, InfluxResult};
use crate::http::{
    HttpBackend, HttpRequest, HttpResponse, ReqwestBackend, RetryPolicy, send_with_retry,
};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default InfluxDB client using the reqwest HTTP backend.
pub type DefaultInfluxClient = InfluxClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the InfluxDB v2 HTTP API.
///
/// Generic over an HTTP backend so tests can script server responses. Use
/// [`DefaultInfluxClient`] in production code.
pub struct InfluxClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: InfluxConfig,
    base_url: Url,
}

impl DefaultInfluxClient {
    /// Create a new client with the given configuration.
    pub fn new(config: InfluxConfig) -> InfluxResult<Self> {
        let backend = ReqwestBackend::new(&config)?;
        Self::with_backend(config, backend)
    }
}

impl<B: HttpBackend> InfluxClient<B> {
    /// Create a client over a custom backend.
    pub fn with_backend(config: InfluxConfig, backend: B) -> InfluxResult<Self> {
        let base_url = Url::parse(config.url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(InfluxError::InvalidConfig(format!(
                "'{}' cannot be used as a base URL",
                config.url
            )));
        }
        Ok(Self {
            backend,
            config,
            base_url,
        })
    }

    pub const fn config(&self) -> &InfluxConfig {
        &self.config
    }

    pub(crate) const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.config.max_retries,
            base_delay: self.config.retry_base_delay,
        }
    }

    /// Resolve an API path below the base URL, keeping any base path prefix.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Attach the token header when one is configured.
    pub(crate) fn authorize(&self, request: HttpRequest) -> HttpRequest {
        match &self.config.token {
            Some(token) => request.header("Authorization", format!("Token {token}")),
            None => request,
        }
    }

    /// Send with the configured retry policy.
    pub(crate) async fn execute(&self, request: &HttpRequest) -> InfluxResult<HttpResponse> {
        send_with_retry(&self.backend, request, self.retry_policy()).await
    }

    /// Query the server's `/health` endpoint once.
    ///
    /// Succeeds when the server answers 2xx and, if the body is the usual
    /// JSON health document, reports `"status": "pass"`.
    pub async fn check_health(&self) -> InfluxResult<()> {
        let request = HttpRequest::get(self.endpoint(&["health"]));
        let policy = RetryPolicy {
            max_retries: 0,
            ..self.retry_policy()
        };
        let response = send_with_retry(&self.backend, &request, policy).await?;

        let status = serde_json::from_str::<serde_json::Value>(&response.body)
            .ok()
            .and_then(|v| v.get("status").and_then(|s| s.as_str()).map(str::to_string));
        match status.as_deref() {
            None | Some("pass") => Ok(()),
            Some(other) => Err(InfluxError::InvalidResponse {
                message: format!("health status is '{other}'"),
            }),
        }
    }
}
