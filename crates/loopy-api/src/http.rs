//! HTTP backend abstraction for the API client.
//!
//! The client talks to the network only through [`HttpBackend`], so tests
//! can swap in a fake. The production implementation uses reqwest and
//! streams the body chunk by chunk into a [`ResponseSink`].

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::ApiClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::retry::{Attempt, RetryPolicy};

/// Header carrying the application key.
pub const API_KEY_HEADER: &str = "X-LoopyAppID";

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Receiver of a successful response as it streams in.
pub trait ResponseSink: Send + Sync {
    /// Headers arrived with a success status.
    fn on_response(&self, status: u16);

    /// A chunk of the body arrived.
    fn on_chunk(&self, chunk: &[u8]);
}

/// Trait for HTTP backends that can post JSON to a URL.
///
/// This is an implementation detail - external code should use `ApiClient`.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST `body` as JSON to `url`.
    ///
    /// On a 2xx status the backend calls `sink.on_response` once, streams the
    /// body through `sink.on_chunk` and returns `Ok(status)`. Any other
    /// status is returned as [`ApiError::RequestFailed`] without touching
    /// the sink.
    async fn post_json(
        &self,
        url: &Url,
        body: &Value,
        sink: &dyn ResponseSink,
    ) -> ApiResult<u16>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Retries 5xx responses and connection errors with exponential backoff.
/// Failures after the body started streaming are not retried.
pub struct ReqwestBackend {
    client: reqwest::Client,
    policy: RetryPolicy,
    api_key: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &ApiClientConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            policy: RetryPolicy {
                max_retries: config.max_retries,
                base_delay: config.retry_base_delay,
            },
            api_key: config.api_key.clone(),
        })
    }

    /// Build a request with optional application key.
    fn build_request(&self, url: &Url, body: &Value) -> reqwest::RequestBuilder {
        let mut request = self.client.post(url.as_str()).json(body);
        if let Some(ref key) = self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        request
    }

    /// Send with automatic retry for transient errors.
    async fn send_with_retry(&self, url: &Url, body: &Value) -> ApiResult<reqwest::Response> {
        self.policy
            .run(move || async move {
                match self.build_request(url, body).send().await {
                    Ok(response) => match classify_status(response.status().as_u16(), url) {
                        None => Attempt::Done(response),
                        Some(attempt) => attempt,
                    },
                    Err(e) if e.is_builder() => Attempt::Fail(e.into()),
                    Err(e) => Attempt::Retry(e.into()),
                }
            })
            .await
    }
}

/// Classify a response status. `None` means success.
fn classify_status<T>(status: u16, url: &Url) -> Option<Attempt<T>> {
    if (200..300).contains(&status) {
        return None;
    }

    let error = ApiError::RequestFailed {
        status,
        url: url.to_string(),
    };

    // 5xx errors are retryable (server-side issues)
    if (500..600).contains(&status) {
        Some(Attempt::Retry(error))
    } else {
        Some(Attempt::Fail(error))
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json(
        &self,
        url: &Url,
        body: &Value,
        sink: &dyn ResponseSink,
    ) -> ApiResult<u16> {
        let mut response = self.send_with_retry(url, body).await?;
        let status = response.status().as_u16();
        debug!(%url, status, "Response received");
        sink.on_response(status);

        while let Some(chunk) = response.chunk().await? {
            sink.on_chunk(&chunk);
        }

        Ok(status)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://api.example.com/v1/open").unwrap()
    }

    #[test]
    fn test_classify_success() {
        assert!(classify_status::<()>(200, &url()).is_none());
        assert!(classify_status::<()>(204, &url()).is_none());
    }

    #[test]
    fn test_classify_server_error_is_retryable() {
        assert!(matches!(
            classify_status::<()>(502, &url()),
            Some(Attempt::Retry(ApiError::RequestFailed { status: 502, .. }))
        ));
    }

    #[test]
    fn test_classify_client_error_fails() {
        assert!(matches!(
            classify_status::<()>(404, &url()),
            Some(Attempt::Fail(ApiError::RequestFailed { status: 404, .. }))
        ));
        assert!(matches!(
            classify_status::<()>(301, &url()),
            Some(Attempt::Fail(_))
        ));
    }

    #[test]
    fn test_reqwest_backend_creation() {
        let config = ApiClientConfig::new("https://api.example.com")
            .with_max_retries(2)
            .with_api_key("key");
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.policy.max_retries, 2);
        assert_eq!(backend.api_key, Some("key".to_string()));
    }
}
