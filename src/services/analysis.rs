//! Per-ticker trading analysis.

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{AnalysisResult, MergeMode, TickerStatus};
use crate::session::Shared;

/// Runs the backend analysis for a ticker and commits it into the session.
pub struct AnalysisClient<'a> {
    shared: &'a Shared,
}

impl<'a> AnalysisClient<'a> {
    pub fn new(shared: &'a Shared) -> Self {
        Self { shared }
    }

    /// Analyze `ticker` and commit the outcome.
    ///
    /// The ticker is passed to the backend unchecked. Order of effects:
    /// `loading` is raised, the request is issued, then the record is
    /// committed. In [`MergeMode::Compatible`] a success replaces the record
    /// with the response and a failure replaces it with an empty one; either
    /// way the status is reset to `{loading: false}`. On failure the error is
    /// returned after the state has been committed.
    pub async fn run(&self, ticker: &str) -> Result<AnalysisResult> {
        self.shared.lock().status_mut(ticker).loading = true;
        debug!(ticker = %ticker, "analysis started");

        let outcome = self.shared.api.analyze(ticker).await;
        let mode = self.shared.settings.merge_mode;

        let mut session = self.shared.lock();
        match outcome {
            Ok(response) => {
                let record = match mode {
                    MergeMode::Compatible => {
                        session.statuses.insert(ticker.to_string(), TickerStatus::default());
                        response
                    }
                    MergeMode::Preserving => {
                        session.status_mut(ticker).loading = false;
                        let mut record = session.results.remove(ticker).unwrap_or_default();
                        record.overlay(response);
                        record
                    }
                };
                if let Some(error) = record.error() {
                    warn!(ticker = %ticker, error = %error, "backend reported an analysis error");
                }
                session.results.insert(ticker.to_string(), record.clone());
                debug!(ticker = %ticker, has_price = record.has_price(), "analysis committed");
                Ok(record)
            }
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "analysis failed");
                match mode {
                    MergeMode::Compatible => {
                        session.results.insert(ticker.to_string(), AnalysisResult::default());
                        session.statuses.insert(ticker.to_string(), TickerStatus::default());
                    }
                    MergeMode::Preserving => {
                        session.status_mut(ticker).loading = false;
                    }
                }
                Err(e)
            }
        }
    }
}
