//! Open command handler.
//!
//! Composes the open payload from the current device signals and posts it
//! to `{url_prefix}/open`, waiting for the delegate to be told the outcome.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result, anyhow};
use loopy_api::{ApiClientConfig, ApiDelegate, ApiError, ApiResponse, ApiResult, DefaultApiClient};
use loopy_core::OpenPayload;
use tracing::{debug, info};

use crate::bootstrap::CliContext;

/// Options for the open command.
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    pub url_prefix: Option<String>,
    pub api_key: Option<String>,
    pub retries: u8,
    pub dry_run: bool,
}

/// Delegate that keeps the terminal outcome for the caller.
#[derive(Default)]
struct CollectingDelegate {
    outcome: Mutex<Option<ApiResult<ApiResponse>>>,
}

impl CollectingDelegate {
    /// The reported outcome; a request that never completed counts as aborted.
    fn take(&self) -> ApiResult<ApiResponse> {
        self.outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .unwrap_or(Err(ApiError::Aborted))
    }

    fn store(&self, outcome: ApiResult<ApiResponse>) {
        *self.outcome.lock().unwrap_or_else(PoisonError::into_inner) = Some(outcome);
    }
}

impl ApiDelegate for CollectingDelegate {
    fn did_receive_response(&self, status: u16) {
        debug!(status, "Response received");
    }

    fn did_receive_data(&self, chunk: &[u8]) {
        debug!(bytes = chunk.len(), "Body chunk received");
    }

    fn did_finish_loading(&self, response: ApiResponse) {
        self.store(Ok(response));
    }

    fn did_fail(&self, error: ApiError) {
        self.store(Err(error));
    }
}

/// Execute the open command.
pub async fn execute(ctx: &CliContext, options: OpenOptions) -> Result<()> {
    let payload = OpenPayload::from_settings(&ctx.settings, ctx.stdid).to_value();

    if options.dry_run {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let url_prefix = options
        .url_prefix
        .ok_or_else(|| anyhow!("No API URL configured. Pass --url-prefix or set LOOPY_URL_PREFIX"))?;

    let config = ApiClientConfig::new(url_prefix)
        .with_optional_api_key(options.api_key)
        .with_max_retries(options.retries);
    let client = DefaultApiClient::with_config(&config).context("Failed to create API client")?;

    let delegate = Arc::new(CollectingDelegate::default());
    let callbacks: Arc<dyn ApiDelegate> = delegate.clone();
    client.open(payload, callbacks).wait().await;

    let response = delegate.take().context("Open request failed")?;
    info!(status = response.status, bytes = response.body.len(), "Open request finished");
    println!("{}", response.text());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{CliConfig, bootstrap};
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> CliContext {
        bootstrap(CliConfig {
            data_dir: Some(dir.path().to_path_buf()),
            disable_location: true,
            ..CliConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_delegate_without_outcome_reports_aborted() {
        let delegate = CollectingDelegate::default();
        assert!(matches!(delegate.take(), Err(ApiError::Aborted)));
    }

    #[test]
    fn test_delegate_keeps_last_outcome() {
        let delegate = CollectingDelegate::default();
        delegate.did_finish_loading(ApiResponse {
            status: 200,
            body: "ok".into(),
        });

        let response = delegate.take().unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.text(), "ok");
    }

    #[tokio::test]
    async fn test_missing_url_prefix() {
        let dir = TempDir::new().unwrap();
        let err = execute(&context(&dir), OpenOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("LOOPY_URL_PREFIX"));
    }

    #[tokio::test]
    async fn test_dry_run_sends_nothing() {
        let dir = TempDir::new().unwrap();
        let options = OpenOptions {
            dry_run: true,
            ..OpenOptions::default()
        };
        execute(&context(&dir), options).await.unwrap();
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_rejected() {
        let dir = TempDir::new().unwrap();
        let options = OpenOptions {
            url_prefix: Some("ftp://example.com/v1".to_string()),
            ..OpenOptions::default()
        };
        let err = execute(&context(&dir), options).await.unwrap_err();
        assert!(err.to_string().contains("API client"));
    }

    #[tokio::test]
    async fn test_open_posts_payload_and_succeeds() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            let expected_len = loop {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed mid-request");
                request.extend_from_slice(&chunk[..n]);
                if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&request[..end]).to_lowercase();
                    let body_len: usize = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .map_or(0, |v| v.trim().parse().unwrap());
                    break end + 4 + body_len;
                }
            };
            while request.len() < expected_len {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed mid-body");
                request.extend_from_slice(&chunk[..n]);
            }
            let body = r#"{"ok":true}"#;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let options = OpenOptions {
            url_prefix: Some(format!("http://127.0.0.1:{port}/v1")),
            api_key: Some("app-key".to_string()),
            ..OpenOptions::default()
        };
        execute(&ctx, options).await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1/open HTTP/1.1"));
        assert!(request.to_lowercase().contains("x-loopyappid: app-key"));
        assert!(request.contains(&ctx.stdid.to_string()));
    }

    #[tokio::test]
    async fn test_connection_refused_is_an_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let dir = TempDir::new().unwrap();
        let options = OpenOptions {
            url_prefix: Some(format!("http://127.0.0.1:{port}/v1")),
            ..OpenOptions::default()
        };
        let err = execute(&context(&dir), options).await.unwrap_err();
        assert!(err.to_string().contains("Open request failed"));
    }
}
