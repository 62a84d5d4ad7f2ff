//! Public configuration for the API client.

use std::time::Duration;

/// Configuration for the API client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use loopy_api::ApiClientConfig;
/// use std::time::Duration;
///
/// let config = ApiClientConfig::new("https://api.example.com/v1")
///     .with_timeout(Duration::from_secs(10))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// URL every endpoint path is appended to
    pub(crate) url_prefix: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Optional application key sent with every request
    pub(crate) api_key: Option<String>,
    /// Maximum number of retry attempts for transient errors
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl ApiClientConfig {
    /// Create a configuration for `url_prefix` with default settings.
    ///
    /// Requests are not retried unless [`Self::with_max_retries`] is used,
    /// since `open` and `install` are not idempotent on the server.
    #[must_use]
    pub fn new(url_prefix: impl Into<String>) -> Self {
        Self {
            url_prefix: url_prefix.into(),
            user_agent: concat!("loopy/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            api_key: None,
            max_retries: 0,
            retry_base_delay: Duration::from_millis(500),
        }
    }

    /// The configured URL prefix.
    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
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

    /// Set the application key sent in the `X-LoopyAppID` header.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set an optional application key.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key;
        self
    }

    /// Set the maximum number of retry attempts for 5xx and network errors.
    ///
    /// Defaults to 0.
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
}
