//! Retry policy with exponential backoff.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::{ApiError, ApiResult};

/// Outcome of a single attempt.
pub enum Attempt<T> {
    /// Finished; return this value.
    Done(T),
    /// Transient failure (5xx or network); try again if attempts remain.
    Retry(ApiError),
    /// Permanent failure; give up immediately.
    Fail(ApiError),
}

/// How many times to retry and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u8,
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based): `base * 2^(attempt-1)`.
    pub fn delay_for(&self, attempt: u8) -> Duration {
        let exponent = u32::from(attempt.saturating_sub(1)).min(16);
        self.base_delay.saturating_mul(2u32.pow(exponent))
    }

    /// Run `attempt` until it is done, fails permanently, or retries run out.
    pub async fn run<T, F, Fut>(&self, mut attempt: F) -> ApiResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Attempt<T>>,
    {
        let mut tries: u8 = 0;
        loop {
            if tries > 0 {
                let delay = self.delay_for(tries);
                debug!(attempt = tries, ?delay, "Retrying request");
                tokio::time::sleep(delay).await;
            }

            match attempt().await {
                Attempt::Done(value) => return Ok(value),
                Attempt::Fail(error) => return Err(error),
                Attempt::Retry(error) => {
                    if tries >= self.max_retries {
                        return Err(error);
                    }
                    tries += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn policy(max_retries: u8) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            base_delay: Duration::from_millis(1),
        }
    }

    fn server_error() -> ApiError {
        ApiError::RequestFailed {
            status: 503,
            url: "http://localhost/open".to_string(),
        }
    }

    #[test]
    fn test_delay_doubles() {
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for(2), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let calls = AtomicUsize::new(0);
        let result = policy(3)
            .run(|| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Attempt::Retry(server_error())
                    } else {
                        Attempt::Done(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let calls = AtomicUsize::new(0);
        let result: ApiResult<()> = policy(2)
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Attempt::Retry(server_error()) }
            })
            .await;

        assert_eq!(result.unwrap_err().status(), Some(503));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let calls = AtomicUsize::new(0);
        let result: ApiResult<()> = policy(5)
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Attempt::Fail(ApiError::RequestFailed {
                        status: 400,
                        url: "http://localhost/open".to_string(),
                    })
                }
            })
            .await;

        assert_eq!(result.unwrap_err().status(), Some(400));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_retries_makes_one_attempt() {
        let calls = AtomicUsize::new(0);
        let result: ApiResult<()> = policy(0)
            .run(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Attempt::Retry(server_error()) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
