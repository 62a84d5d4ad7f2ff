//! Request execution and delegate notification.

use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::Url;

use super::{ApiClient, ClientInner, InFlightGuard, endpoints};
use crate::delegate::{ApiDelegate, ApiResponse};
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpBackend, ResponseSink};
use crate::url::build_endpoint_url;

/// Handle to a request started with [`ApiClient::open`].
///
/// Dropping the handle does not cancel the request.
#[must_use = "await `wait()` to know when the delegate has been notified"]
pub struct RequestHandle {
    task: Option<JoinHandle<()>>,
}

impl RequestHandle {
    const fn completed() -> Self {
        Self { task: None }
    }

    /// Whether the delegate has already received its final callback.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait until the delegate has received its final callback.
    pub async fn wait(self) {
        if let Some(task) = self.task
            && let Err(e) = task.await
        {
            warn!(error = %e, "Request task did not run to completion");
        }
    }
}

/// Delivers the single terminal callback.
///
/// If dropped before [`Completion::finish`] runs (task panic or runtime
/// shutdown), the delegate is told the request was aborted.
struct Completion {
    delegate: Option<Arc<dyn ApiDelegate>>,
}

impl Completion {
    fn new(delegate: Arc<dyn ApiDelegate>) -> Self {
        Self {
            delegate: Some(delegate),
        }
    }

    fn delegate(&self) -> Option<&dyn ApiDelegate> {
        self.delegate.as_deref()
    }

    fn finish(mut self, result: ApiResult<ApiResponse>) {
        if let Some(delegate) = self.delegate.take() {
            match result {
                Ok(response) => delegate.did_finish_loading(response),
                Err(error) => delegate.did_fail(error),
            }
        }
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if let Some(delegate) = self.delegate.take() {
            delegate.did_fail(ApiError::Aborted);
        }
    }
}

/// Forwards backend progress into the client buffer and the delegate.
struct BufferSink<'a, B> {
    guard: &'a InFlightGuard<B>,
    delegate: Option<&'a dyn ApiDelegate>,
}

impl<B: HttpBackend> ResponseSink for BufferSink<'_, B> {
    fn on_response(&self, status: u16) {
        if let Some(delegate) = self.delegate {
            delegate.did_receive_response(status);
        }
    }

    fn on_chunk(&self, chunk: &[u8]) {
        self.guard.append(chunk);
        if let Some(delegate) = self.delegate {
            delegate.did_receive_data(chunk);
        }
    }
}

fn validate_payload(payload: &Value) -> ApiResult<()> {
    if payload.is_object() {
        Ok(())
    } else {
        Err(ApiError::InvalidPayload {
            message: format!("expected a JSON object, got {}", json_kind(payload)),
        })
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

async fn execute<B: HttpBackend>(
    guard: &InFlightGuard<B>,
    url: &Url,
    payload: &Value,
    delegate: Option<&dyn ApiDelegate>,
) -> ApiResult<ApiResponse> {
    debug!(%url, "Sending request");
    let sink = BufferSink { guard, delegate };
    let status = guard.inner.backend.post_json(url, payload, &sink).await?;
    let body = guard.body();
    debug!(%url, status, bytes = body.len(), "Request completed");
    Ok(ApiResponse { status, body })
}

impl<B: HttpBackend + 'static> ApiClient<B> {
    /// POST `payload` to the `open` endpoint.
    ///
    /// See [`ApiClient::post`] for the callback contract.
    pub fn open(&self, payload: Value, delegate: Arc<dyn ApiDelegate>) -> RequestHandle {
        self.post(endpoints::OPEN, payload, delegate)
    }

    /// POST `payload` to the `install` endpoint.
    pub fn install(&self, payload: Value, delegate: Arc<dyn ApiDelegate>) -> RequestHandle {
        self.post(endpoints::INSTALL, payload, delegate)
    }

    /// POST `payload` to `endpoint` on the current tokio runtime.
    ///
    /// `delegate` receives exactly one of `did_finish_loading` or
    /// `did_fail`. Failures detected before the request starts (payload not
    /// an object, another request in flight, no runtime) are reported before
    /// this method returns.
    pub fn post(
        &self,
        endpoint: &str,
        payload: Value,
        delegate: Arc<dyn ApiDelegate>,
    ) -> RequestHandle {
        let completion = Completion::new(delegate);

        if let Err(error) = validate_payload(&payload) {
            completion.finish(Err(error));
            return RequestHandle::completed();
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("open called outside of a tokio runtime");
            completion.finish(Err(ApiError::NoRuntime));
            return RequestHandle::completed();
        };

        let Some(guard) = InFlightGuard::acquire(&self.inner) else {
            debug!(endpoint, "Rejecting request; another one is in flight");
            completion.finish(Err(ApiError::RequestInFlight));
            return RequestHandle::completed();
        };

        let url = build_endpoint_url(&self.inner.url_prefix, endpoint);
        let task = runtime.spawn(async move {
            let result = execute(&guard, &url, &payload, completion.delegate()).await;
            // Free the client before the delegate runs so it can start a follow-up request.
            drop(guard);
            completion.finish(result);
        });

        RequestHandle { task: Some(task) }
    }

    /// POST `payload` to `endpoint` and await the response.
    pub async fn send(&self, endpoint: &str, payload: Value) -> ApiResult<ApiResponse> {
        validate_payload(&payload)?;
        let guard = InFlightGuard::acquire(&self.inner).ok_or(ApiError::RequestInFlight)?;
        let url = build_endpoint_url(&self.inner.url_prefix, endpoint);
        execute(&guard, &url, &payload, None).await
    }
}

impl<B> ClientInner<B> {
    #[cfg(test)]
    pub(crate) fn endpoint_url(&self, endpoint: &str) -> Url {
        build_endpoint_url(&self.url_prefix, endpoint)
    }
}
