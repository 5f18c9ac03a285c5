//! The `run` command: launches one job per feed and prints their summaries.
//!
//! Jobs run concurrently and share only the immutable HTTP client. Output is
//! printed in the order the feeds were requested, regardless of which job
//! finishes first.

use std::io::Write;

use feedmap_core::{AppConfig, FeedFormat};
use feedmap_feeds::{FeedClient, FeedJob, FeedSource, JobOutcome};
use futures::future::join_all;

/// Runs every feed in `formats` and prints one summary line per feed.
///
/// Returns `Ok(true)` when every job mapped successfully. A failed job is
/// reported through its summary line and the return value, not as `Err`.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or stdout cannot be
/// written.
pub(crate) async fn run_feeds(
    config: &AppConfig,
    formats: &[FeedFormat],
    emit_updates: bool,
) -> anyhow::Result<bool> {
    let client = FeedClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build feed client: {e}"))?;

    let jobs: Vec<FeedJob> = formats
        .iter()
        .map(|&format| FeedJob::new(client.clone(), FeedSource::from_config(config, format)))
        .collect();

    let outcomes = join_all(jobs.iter().map(|job| job.run())).await;

    let mut stdout = std::io::stdout().lock();
    for outcome in &outcomes {
        if emit_updates {
            write_updates(&mut stdout, outcome)?;
        }
        writeln!(stdout, "{outcome}")?;
    }

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed > 0 {
        tracing::warn!(failed, total = outcomes.len(), "some feeds failed");
    }
    Ok(failed == 0)
}

/// Writes each mapped update of a successful outcome as one JSON line.
fn write_updates(out: &mut impl Write, outcome: &JobOutcome) -> anyhow::Result<()> {
    if let JobOutcome::Mapped(report) = outcome {
        for update in &report.updates {
            serde_json::to_writer(&mut *out, update)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
