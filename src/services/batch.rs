//! Sequential batch analysis over the visible tickers.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::session::Shared;

use super::AnalysisClient;

/// What one batch run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Tickers sent to the backend, in order (includes failures).
    pub analyzed: Vec<String>,
    /// Tickers skipped because they already had a usable price.
    pub skipped: Vec<String>,
    /// Subset of `analyzed` whose request failed.
    pub failed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Another run was active; nothing happened.
    AlreadyRunning,
    Completed(BatchReport),
}

/// Clears the running flag when dropped, including when the run future is
/// dropped mid-flight.
struct RunningGuard<'a>(&'a AtomicBool);

impl<'a> RunningGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Analyzes the first `batch_limit` visible tickers one at a time.
pub struct BatchSequencer<'a> {
    shared: &'a Shared,
}

impl<'a> BatchSequencer<'a> {
    pub fn new(shared: &'a Shared) -> Self {
        Self { shared }
    }

    /// Whether a run is in progress.
    pub fn is_running(&self) -> bool {
        self.shared.batch_running.load(Ordering::Acquire)
    }

    /// Run one batch.
    ///
    /// The ticker list is the visible (filtered) list at the moment of the
    /// call, truncated to `batch_limit`. A ticker whose cached price is
    /// usable is skipped without a request. Every real request is awaited
    /// to completion and followed by `batch_delay` before the next ticker.
    /// Individual failures are recorded and never stop the run.
    pub async fn run(&self) -> BatchOutcome {
        let Some(_guard) = RunningGuard::acquire(&self.shared.batch_running) else {
            debug!("batch already running; trigger ignored");
            return BatchOutcome::AlreadyRunning;
        };

        let settings = self.shared.settings;
        let tickers: Vec<String> = self
            .shared
            .lock()
            .visible_stocks()
            .into_iter()
            .take(settings.batch_limit)
            .map(|s| s.ticker)
            .collect();
        info!(count = tickers.len(), "batch analysis started");

        let client = AnalysisClient::new(self.shared);
        let mut report = BatchReport::default();

        for ticker in tickers {
            if self.shared.lock().has_price(&ticker) {
                debug!(ticker = %ticker, "cached price present; skipping");
                report.skipped.push(ticker);
                continue;
            }

            if client.run(&ticker).await.is_err() {
                report.failed.push(ticker.clone());
            }
            report.analyzed.push(ticker);

            tokio::time::sleep(settings.batch_delay).await;
        }

        info!(
            analyzed = report.analyzed.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "batch analysis finished"
        );
        BatchOutcome::Completed(report)
    }
}
