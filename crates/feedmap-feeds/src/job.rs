//! Fetch → parse → map driver for a single feed.
//!
//! A [`FeedJob`] never returns an error: retrieval and parse failures become
//! [`JobOutcome::Failed`] with the original [`FeedError`] attached, so
//! callers can log the cause while printing the fixed summary line.

use std::fmt;
use std::time::Instant;

use feedmap_core::{AppConfig, CanonicalProductUpdate, FeedFormat};

use crate::client::FeedClient;
use crate::error::FeedError;
use crate::mapper::map_rows;
use crate::parse::parse_feed;

/// Summary line printed for any failed job.
pub const FAILURE_MESSAGE: &str = "Failed to fetch or map products.";

/// Where a feed lives and how to decode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    pub format: FeedFormat,
    pub endpoint: String,
}

impl FeedSource {
    #[must_use]
    pub fn new(format: FeedFormat, endpoint: impl Into<String>) -> Self {
        Self {
            format,
            endpoint: endpoint.into(),
        }
    }

    /// Source for `format` at the endpoint configured in `config`.
    #[must_use]
    pub fn from_config(config: &AppConfig, format: FeedFormat) -> Self {
        Self::new(format, config.feed_url(format))
    }
}

/// Counts and updates from a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub format: FeedFormat,
    /// Number of updates produced; equals `updates.len()`.
    pub mapped_count: usize,
    /// Rows dropped for lacking a product id or name.
    pub skipped_count: usize,
    pub updates: Vec<CanonicalProductUpdate>,
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mapped {} products successfully. ({})",
            self.mapped_count,
            self.format.label()
        )
    }
}

/// A failed run and its cause.
#[derive(Debug)]
pub struct JobFailure {
    pub format: FeedFormat,
    pub error: FeedError,
}

impl fmt::Display for JobFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(FAILURE_MESSAGE)
    }
}

#[derive(Debug)]
pub enum JobOutcome {
    Mapped(SummaryReport),
    Failed(JobFailure),
}

impl JobOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }

    #[must_use]
    pub fn format(&self) -> FeedFormat {
        match self {
            Self::Mapped(report) => report.format,
            Self::Failed(failure) => failure.format,
        }
    }

    /// Number of mapped products, or `None` for a failed run.
    #[must_use]
    pub fn mapped_count(&self) -> Option<usize> {
        match self {
            Self::Mapped(report) => Some(report.mapped_count),
            Self::Failed(_) => None,
        }
    }
}

impl fmt::Display for JobOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapped(report) => fmt::Display::fmt(report, f),
            Self::Failed(failure) => fmt::Display::fmt(failure, f),
        }
    }
}

/// One run of one feed.
#[derive(Debug, Clone)]
pub struct FeedJob {
    client: FeedClient,
    source: FeedSource,
}

impl FeedJob {
    #[must_use]
    pub fn new(client: FeedClient, source: FeedSource) -> Self {
        Self { client, source }
    }

    /// Retrieves, parses and maps the feed.
    ///
    /// A parse failure discards every row of the run; there is no partial
    /// result.
    pub async fn run(&self) -> JobOutcome {
        let format = self.source.format;
        let started = Instant::now();
        tracing::info!(%format, endpoint = %self.source.endpoint, "feed job started");

        match self.fetch_and_map().await {
            Ok(report) => {
                tracing::info!(
                    %format,
                    mapped = report.mapped_count,
                    skipped = report.skipped_count,
                    elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                    "feed job finished"
                );
                JobOutcome::Mapped(report)
            }
            Err(error) => {
                tracing::error!(
                    %format,
                    endpoint = %self.source.endpoint,
                    retrieval = error.is_retrieval(),
                    error = %error,
                    "feed job failed"
                );
                JobOutcome::Failed(JobFailure { format, error })
            }
        }
    }

    async fn fetch_and_map(&self) -> Result<SummaryReport, FeedError> {
        let body = self.client.fetch_text(&self.source.endpoint).await?;
        let rows = parse_feed(self.source.format, &body)?;
        let mapped = map_rows(rows);
        Ok(SummaryReport {
            format: self.source.format,
            mapped_count: mapped.updates.len(),
            skipped_count: mapped.skipped,
            updates: mapped.updates,
        })
    }
}
