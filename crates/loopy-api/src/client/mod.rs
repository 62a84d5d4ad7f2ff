//! API client for posting JSON payloads to the loopy service.
//!
//! Each client owns a URL prefix and a response buffer. Only one request
//! may be in flight per client; the buffer is reset when a request starts
//! and filled as body chunks arrive.

mod request;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use bytes::{Bytes, BytesMut};
use url::Url;

use crate::config::ApiClientConfig;
use crate::error::ApiResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::url::parse_prefix;

pub use request::RequestHandle;

/// Endpoint names below the URL prefix.
pub mod endpoints {
    /// Session start.
    pub const OPEN: &str = "open";
    /// First launch after installation.
    pub const INSTALL: &str = "install";
}

// ============================================================================
// Type Aliases
// ============================================================================

/// Default API client using the reqwest HTTP backend.
pub type DefaultApiClient = ApiClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the loopy HTTP API.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultApiClient` for production code. Cloning is cheap and clones
/// share the response buffer and the in-flight flag.
pub struct ApiClient<B: HttpBackend> {
    inner: Arc<ClientInner<B>>,
}

impl<B: HttpBackend> Clone for ApiClient<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

pub(crate) struct ClientInner<B> {
    pub(crate) backend: B,
    pub(crate) url_prefix: Url,
    in_flight: AtomicBool,
    response_data: Mutex<BytesMut>,
}

impl DefaultApiClient {
    /// Create a client for `url_prefix` with default settings.
    pub fn new(url_prefix: &str) -> ApiResult<Self> {
        Self::with_config(&ApiClientConfig::new(url_prefix))
    }

    /// Create a new client with the given configuration.
    pub fn with_config(config: &ApiClientConfig) -> ApiResult<Self> {
        let url_prefix = parse_prefix(&config.url_prefix)?;
        let backend = ReqwestBackend::new(config)?;
        Ok(Self::from_parts(url_prefix, backend))
    }
}

impl<B: HttpBackend> ApiClient<B> {
    fn from_parts(url_prefix: Url, backend: B) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                backend,
                url_prefix,
                in_flight: AtomicBool::new(false),
                response_data: Mutex::new(BytesMut::new()),
            }),
        }
    }

    /// Create a new client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) fn with_backend(url_prefix: &str, backend: B) -> ApiResult<Self> {
        Ok(Self::from_parts(parse_prefix(url_prefix)?, backend))
    }

    /// The URL prefix every endpoint is appended to.
    pub fn url_prefix(&self) -> &Url {
        &self.inner.url_prefix
    }

    /// Bytes received so far for the current or most recent request.
    pub fn response_data(&self) -> Bytes {
        Bytes::copy_from_slice(&self.inner.lock_buffer())
    }

    /// Whether a request is currently in flight.
    pub fn is_in_flight(&self) -> bool {
        self.inner.in_flight.load(Ordering::Acquire)
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        &self.inner.backend
    }
}

impl<B> ClientInner<B> {
    fn lock_buffer(&self) -> std::sync::MutexGuard<'_, BytesMut> {
        self.response_data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Marks a client busy for as long as it lives.
pub(crate) struct InFlightGuard<B> {
    inner: Arc<ClientInner<B>>,
}

impl<B> InFlightGuard<B> {
    /// Claim the client, or `None` if another request holds it.
    fn acquire(inner: &Arc<ClientInner<B>>) -> Option<Self> {
        inner
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| {
                inner.lock_buffer().clear();
                Self {
                    inner: Arc::clone(inner),
                }
            })
    }

    fn append(&self, chunk: &[u8]) {
        self.inner.lock_buffer().extend_from_slice(chunk);
    }

    fn body(&self) -> Bytes {
        Bytes::copy_from_slice(&self.inner.lock_buffer())
    }
}

impl<B> Drop for InFlightGuard<B> {
    fn drop(&mut self) {
        self.inner.in_flight.store(false, Ordering::Release);
    }
}
