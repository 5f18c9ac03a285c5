//! HTTP client for retrieving feed bodies.

use std::time::Duration;

use feedmap_core::AppConfig;
use reqwest::Client;

use crate::error::FeedError;
use crate::retry::retry_with_backoff;

/// Fallback when a 429 response carries no usable `Retry-After` header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// HTTP client that fetches feed bodies as text.
///
/// Handles rate limiting (429), not-found (404), and other non-2xx responses
/// as typed errors. Transient failures are retried with exponential back-off
/// up to `max_retries` additional attempts.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl FeedClient {
    /// Creates a `FeedClient` with configured timeout, `User-Agent`, and retry policy.
    ///
    /// `max_retries` is the number of additional attempts after the first failure for
    /// retriable errors. Set to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Creates a `FeedClient` from the request settings in `config`.
    ///
    /// # Errors
    ///
    /// See [`FeedClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FeedError> {
        Self::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// Fetches `url` and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`FeedError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`FeedError::NotFound`]: HTTP 404 (not retried).
    /// - [`FeedError::UnexpectedStatus`]: any other non-2xx status (5xx retried, 4xx not).
    /// - [`FeedError::Http`]: network or TLS failure, or a body that is not valid text.
    pub async fn fetch_text(&self, url: &str) -> Result<String, FeedError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self
                .client
                .get(url)
                .header(
                    reqwest::header::ACCEPT,
                    "application/json,application/xml,text/xml,text/plain;q=0.9,*/*;q=0.8",
                )
                .send()
                .await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                return Err(FeedError::RateLimited {
                    url: url.to_owned(),
                    retry_after_secs,
                });
            }

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(FeedError::NotFound {
                    url: url.to_owned(),
                });
            }

            if !status.is_success() {
                return Err(FeedError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            Ok(response.text().await?)
        })
        .await
    }
}
