//! Delegate callbacks and the completed response.

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};

/// A completed, successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code (2xx)
    pub status: u16,
    /// Entire response body
    pub body: Bytes,
}

impl ApiResponse {
    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }

    /// Body as UTF-8 text, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Receiver of request progress.
///
/// For every request the client calls `did_receive_response` at most once,
/// `did_receive_data` zero or more times, and then exactly one of
/// `did_finish_loading` or `did_fail`. Callbacks run on a runtime worker
/// thread and should not block.
pub trait ApiDelegate: Send + Sync {
    /// Response headers arrived with a success status.
    fn did_receive_response(&self, _status: u16) {}

    /// A chunk of the body arrived.
    fn did_receive_data(&self, _chunk: &[u8]) {}

    /// The request completed successfully.
    fn did_finish_loading(&self, response: ApiResponse);

    /// The request failed.
    fn did_fail(&self, error: ApiError);
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_response_json() {
        let response = ApiResponse {
            status: 200,
            body: Bytes::from_static(br#"{"shortlink":"http://x.y/abc"}"#),
        };
        let value: Value = response.json().unwrap();
        assert_eq!(value["shortlink"], "http://x.y/abc");
    }

    #[test]
    fn test_response_invalid_json() {
        let response = ApiResponse {
            status: 200,
            body: Bytes::from_static(b"not json"),
        };
        let result: ApiResult<Value> = response.json();
        assert!(matches!(result, Err(ApiError::JsonParse(_))));
        assert_eq!(response.text(), "not json");
    }
}
