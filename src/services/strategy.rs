//! AI strategy commentary for a ticker.

use tracing::{debug, warn};

use crate::error::{DashboardError, Result};
use crate::models::{AnalysisResult, StrategyRequest};
use crate::session::{DashboardEvent, Shared};

use super::AnalysisClient;

/// Requests AI strategy fields and overlays them onto the ticker's record.
pub struct StrategyClient<'a> {
    shared: &'a Shared,
}

impl<'a> StrategyClient<'a> {
    pub fn new(shared: &'a Shared) -> Self {
        Self { shared }
    }

    /// Run the AI strategy for `ticker`.
    ///
    /// Without a configured credential no request is made: the settings
    /// surface is opened, [`DashboardEvent::CredentialRequired`] is emitted and
    /// [`DashboardError::CredentialMissing`] is returned.
    ///
    /// When the ticker has no usable price yet, a plain analysis runs first.
    /// Its failure is logged and the AI request still goes out with whatever
    /// the record holds.
    ///
    /// The response is overlaid onto the record as it stands when the
    /// response arrives, so base fields survive. On failure only `ai_loading`
    /// is cleared and the record is left as is.
    pub async fn run(&self, ticker: &str) -> Result<AnalysisResult> {
        let credential = self.shared.lock().credential.clone();
        if credential.is_empty() {
            debug!(ticker = %ticker, "no credential; prompting");
            self.shared.emit(DashboardEvent::CredentialRequired {
                ticker: ticker.to_string(),
            });
            self.shared.set_settings_visible(true);
            return Err(DashboardError::CredentialMissing);
        }

        let needs_base = !self.shared.lock().has_price(ticker);
        if needs_base {
            if let Err(e) = AnalysisClient::new(self.shared).run(ticker).await {
                warn!(ticker = %ticker, error = %e, "base analysis failed; continuing with AI request");
            }
        }

        let request = {
            let mut session = self.shared.lock();
            session.status_mut(ticker).ai_loading = true;
            StrategyRequest {
                analysis: session.results.get(ticker).cloned().unwrap_or_default(),
                ticker: ticker.to_string(),
                name: session.stock_name(ticker),
            }
        };
        debug!(ticker = %ticker, "AI strategy requested");

        let outcome = self.shared.api.strategy(ticker, &request, &credential).await;

        let mut session = self.shared.lock();
        session.status_mut(ticker).ai_loading = false;
        match outcome {
            Ok(response) => {
                let record = session.results.entry(ticker.to_string()).or_default();
                record.overlay(response);
                Ok(record.clone())
            }
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "AI strategy failed");
                Err(e)
            }
        }
    }
}
