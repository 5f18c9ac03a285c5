//! Retry with exponential back-off and jitter for feed retrieval.
//!
//! Only transient retrieval failures are retried. Anything that would fail
//! the same way again (404, other 4xx, undecodable bodies) is returned
//! immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::FeedError;

/// Upper bound on a single back-off sleep.
const MAX_DELAY_MS: u64 = 60_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - [`FeedError::RateLimited`]: HTTP 429.
/// - [`FeedError::Http`] timeouts and connection failures.
/// - [`FeedError::UnexpectedStatus`] with a 5xx status.
///
/// **Not retriable:** [`FeedError::NotFound`], 4xx statuses, and every parse error.
pub(crate) fn is_retriable(err: &FeedError) -> bool {
    match err {
        FeedError::RateLimited { .. } => true,
        FeedError::Http(e) => e.is_timeout() || e.is_connect(),
        FeedError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        FeedError::NotFound { .. }
        | FeedError::Json { .. }
        | FeedError::Xml(_)
        | FeedError::MissingElement { .. }
        | FeedError::UnclosedElement { .. } => false,
    }
}

/// Base delay before retry number `attempt` (1-based), before jitter.
///
/// A server-supplied `Retry-After` wins over the computed delay when larger.
fn backoff_delay_ms(err: &FeedError, attempt: u32, backoff_base_ms: u64) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
    let server_hint = match err {
        FeedError::RateLimited {
            retry_after_secs, ..
        } => retry_after_secs.saturating_mul(1000),
        _ => 0,
    };
    computed.max(server_hint).min(MAX_DELAY_MS)
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Attempt | Sleep before next attempt    |
/// |---------|------------------------------|
/// | 1       | 1 000 ms × 2⁰ ± 25 % jitter |
/// | 2       | 1 000 ms × 2¹ ± 25 % jitter |
/// | 3       | 1 000 ms × 2² ± 25 % jitter |
///
/// Delay is capped at 60 s. With `max_retries = 0` the operation runs once.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, FeedError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FeedError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let capped = backoff_delay_ms(&err, attempt, backoff_base_ms);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient feed retrieval error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn rate_limited(retry_after_secs: u64) -> FeedError {
        FeedError::RateLimited {
            url: "https://feeds.example.com/raw".to_owned(),
            retry_after_secs,
        }
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, FeedError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_server_errors_then_succeeds() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                let n = cc.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(FeedError::UnexpectedStatus {
                        status: 503,
                        url: "https://feeds.example.com/json".to_owned(),
                    })
                } else {
                    Ok::<u32, FeedError>(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn propagates_last_error_after_exhausting_retries() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(2, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FeedError>(rate_limited(0))
            }
        })
        .await;
        // max_retries=2 → 3 total attempts
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(FeedError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn zero_retries_runs_once() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(0, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FeedError>(rate_limited(0))
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn does_not_retry_not_found() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, FeedError>(FeedError::NotFound {
                    url: "https://feeds.example.com/raw".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(FeedError::NotFound { .. })));
    }

    #[test]
    fn client_errors_and_parse_errors_are_not_retriable() {
        let forbidden = FeedError::UnexpectedStatus {
            status: 403,
            url: "u".to_owned(),
        };
        let missing = FeedError::MissingElement { element: "rss" };
        assert!(!is_retriable(&forbidden));
        assert!(!is_retriable(&missing));
        assert!(is_retriable(&rate_limited(1)));
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let err = FeedError::UnexpectedStatus {
            status: 500,
            url: "u".to_owned(),
        };
        assert_eq!(backoff_delay_ms(&err, 1, 1_000), 1_000);
        assert_eq!(backoff_delay_ms(&err, 2, 1_000), 2_000);
        assert_eq!(backoff_delay_ms(&err, 3, 1_000), 4_000);
        assert_eq!(backoff_delay_ms(&err, 20, 1_000), MAX_DELAY_MS);
    }

    #[test]
    fn retry_after_hint_raises_delay() {
        assert_eq!(backoff_delay_ms(&rate_limited(5), 1, 100), 5_000);
        assert_eq!(backoff_delay_ms(&rate_limited(600), 1, 100), MAX_DELAY_MS);
    }
}
