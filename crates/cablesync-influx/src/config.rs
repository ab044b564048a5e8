//! Public configuration for the InfluxDB client.

use std::time::Duration;

use cablesync_core::{DEFAULT_BATCH_SIZE, Settings};

/// Configuration for the InfluxDB client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use cablesync_influx::InfluxConfig;
/// use std::time::Duration;
///
/// let config = InfluxConfig::new()
///     .with_url("http://influx.local:8086")
///     .with_bucket("grid")
///     .with_batch_size(200)
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Clone)]
pub struct InfluxConfig {
    /// Base URL of the InfluxDB server
    pub(crate) url: String,
    /// Organisation owning the bucket
    pub(crate) org: String,
    /// Bucket receiving points
    pub(crate) bucket: String,
    /// API token sent as `Authorization: Token <token>`
    pub(crate) token: Option<String>,
    /// Points per write request
    pub(crate) batch_size: usize,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Maximum number of retry attempts for transient errors
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl std::fmt::Debug for InfluxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfluxConfig")
            .field("url", &self.url)
            .field("org", &self.org)
            .field("bucket", &self.bucket)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("batch_size", &self.batch_size)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

impl Default for InfluxConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8086".to_string(),
            org: "sample-org".to_string(),
            bucket: "sample-bucket".to_string(),
            token: None,
            batch_size: DEFAULT_BATCH_SIZE,
            timeout: Duration::from_secs(30),
            user_agent: concat!("cablesync/", env!("CARGO_PKG_VERSION")).to_string(),
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl InfluxConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from application settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new()
            .with_url(&settings.influx_url)
            .with_org(&settings.influx_org)
            .with_bucket(&settings.influx_bucket)
            .with_optional_token(settings.influx_token.clone())
            .with_batch_size(settings.batch_size)
            .with_timeout(Duration::from_secs(settings.connect_timeout_secs))
    }

    /// Set the server base URL.
    ///
    /// Defaults to `http://localhost:8086`.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    #[must_use]
    pub fn with_org(mut self, org: impl Into<String>) -> Self {
        self.org = org.into();
        self
    }

    #[must_use]
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    /// Set the API token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set an optional API token.
    #[must_use]
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Set the number of points per write request.
    ///
    /// Defaults to 50. Zero is treated as 1.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the maximum number of retry attempts for transient errors.
    ///
    /// Defaults to 3 retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }
}
