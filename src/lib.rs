//! Stock dashboard client for Rust.
//!
//! Lists KOSPI/KOSDAQ equities from the dashboard backend, runs per-ticker
//! trading analysis (singly or in a paced batch), requests AI strategy
//! commentary with a locally stored credential, and exports everything to a
//! spreadsheet.
//!
//! The credential is persisted in obfuscated form only. The obfuscation key
//! ships with this crate, so this keeps the key out of plain sight and does
//! not protect it from anyone who can read the store directory.
//!
//! # Quick start
//!
//! ```no_run
//! use stock_dashboard::StockDashboard;
//!
//! # async fn example() -> stock_dashboard::Result<()> {
//! let dashboard = StockDashboard::builder()
//!     .base_url("http://localhost:8000/api")
//!     .build()?;
//!
//! dashboard.stocks().refresh().await?;
//! dashboard.set_search("삼성");
//! dashboard.batch().run().await;
//!
//! dashboard.credentials().save("my-api-key")?;
//! let record = dashboard.strategy().run("005930").await?;
//! println!("{:?}", record.strategic_recommendation);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod store;
pub mod view;

pub use api::{DashboardApi, HttpApi};
pub use error::{DashboardError, Result};
pub use models::{AnalysisResult, Market, MarketFilter, MergeMode, Stock, TickerStatus};
pub use services::{BatchOutcome, BatchReport};
pub use session::{DashboardEvent, TestStatus};
pub use store::CredentialStore;
pub use view::StockRow;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use session::{Settings, Shared};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// StockDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`StockDashboard`].
///
/// Use [`StockDashboard::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](StockDashboardBuilder::build).
pub struct StockDashboardBuilder {
    base_url: String,
    store_dir: Option<PathBuf>,
    timeout: Duration,
    batch_limit: usize,
    batch_delay: Duration,
    merge_mode: MergeMode,
    api: Option<Arc<dyn DashboardApi>>,
}

impl Default for StockDashboardBuilder {
    fn default() -> Self {
        Self {
            base_url: config::DEFAULT_BASE_URL.to_string(),
            store_dir: None,
            timeout: config::DEFAULT_TIMEOUT,
            batch_limit: config::BATCH_LIMIT,
            batch_delay: config::BATCH_DELAY,
            merge_mode: MergeMode::default(),
            api: None,
        }
    }
}

impl StockDashboardBuilder {
    /// Backend root, e.g. `http://localhost:8000/api`.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Directory holding the credential slot.
    ///
    /// Defaults to the platform config directory (e.g.
    /// `~/.config/stock-dashboard` on Linux).
    pub fn store_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.store_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Maximum tickers one batch run considers. Defaults to 20.
    pub fn batch_limit(mut self, limit: usize) -> Self {
        self.batch_limit = limit;
        self
    }

    /// Pause after each batch request. Defaults to 500 ms.
    pub fn batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// How plain analysis commits into existing records. Defaults to
    /// [`MergeMode::Compatible`].
    pub fn merge_mode(mut self, mode: MergeMode) -> Self {
        self.merge_mode = mode;
        self
    }

    /// Use a custom backend instead of [`HttpApi`]. `base_url` and `timeout`
    /// are ignored when set.
    pub fn api(mut self, api: Arc<dyn DashboardApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Build the dashboard: open the credential store and load any persisted
    /// credential.
    ///
    /// Does **not** fetch the stock list; call
    /// [`StockList::refresh`](services::StockList::refresh) for that.
    pub fn build(self) -> Result<StockDashboard> {
        let store = CredentialStore::new(self.store_dir)?;
        let api = match self.api {
            Some(api) => api,
            None => Arc::new(HttpApi::new(&self.base_url, self.timeout)?),
        };
        let settings = Settings {
            batch_limit: self.batch_limit,
            batch_delay: self.batch_delay,
            merge_mode: self.merge_mode,
        };
        Ok(StockDashboard {
            shared: Arc::new(Shared::new(api, store, settings)),
        })
    }
}

// ---------------------------------------------------------------------------
// StockDashboard
// ---------------------------------------------------------------------------

/// The main entry point.
///
/// A cheap, cloneable handle over shared session state. Operations are
/// exposed as lightweight borrowing wrappers; clone the handle to move it
/// into a spawned task.
#[derive(Clone)]
pub struct StockDashboard {
    shared: Arc<Shared>,
}

impl StockDashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> StockDashboardBuilder {
        StockDashboardBuilder::default()
    }

    // -- Operation accessors -----------------------------------------------

    /// Stock list refresh.
    pub fn stocks(&self) -> services::StockList<'_> {
        services::StockList::new(&self.shared)
    }

    /// Single-ticker trading analysis.
    pub fn analysis(&self) -> services::AnalysisClient<'_> {
        services::AnalysisClient::new(&self.shared)
    }

    /// Paced batch analysis over the visible tickers.
    pub fn batch(&self) -> services::BatchSequencer<'_> {
        services::BatchSequencer::new(&self.shared)
    }

    /// AI strategy commentary.
    pub fn strategy(&self) -> services::StrategyClient<'_> {
        services::StrategyClient::new(&self.shared)
    }

    /// Credential save/test and the settings surface.
    pub fn credentials(&self) -> services::CredentialSettings<'_> {
        services::CredentialSettings::new(&self.shared)
    }

    /// Spreadsheet export.
    pub fn export(&self) -> services::Exporter<'_> {
        services::Exporter::new(&self.shared)
    }

    // -- Session state -----------------------------------------------------

    /// Subscribe to UI signals (credential prompt, settings open/close).
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.shared.subscribe()
    }

    /// The full stock list.
    pub fn stock_list(&self) -> Vec<Stock> {
        self.shared.lock().stocks.clone()
    }

    /// Analysis record for `ticker`, if one was ever committed.
    pub fn result(&self, ticker: &str) -> Option<AnalysisResult> {
        self.shared.lock().results.get(ticker).cloned()
    }

    /// Transient flags for `ticker` (all clear when never touched).
    pub fn status(&self, ticker: &str) -> TickerStatus {
        self.shared
            .lock()
            .statuses
            .get(ticker)
            .copied()
            .unwrap_or_default()
    }

    pub fn set_search(&self, term: &str) {
        self.shared.lock().search = term.to_string();
    }

    pub fn set_market_filter(&self, filter: MarketFilter) {
        self.shared.lock().market_filter = filter;
    }

    /// Stocks passing the current search term and market filter.
    pub fn visible_stocks(&self) -> Vec<Stock> {
        self.shared.lock().visible_stocks()
    }

    /// Display rows for the visible stocks, capped at
    /// [`DISPLAY_LIMIT`](config::DISPLAY_LIMIT).
    pub fn rows(&self) -> Vec<StockRow> {
        let session = self.shared.lock();
        let visible = view::filter_stocks(&session.stocks, &session.search, session.market_filter);
        view::table_rows(
            &visible,
            &session.results,
            &session.statuses,
            config::DISPLAY_LIMIT,
        )
    }

    /// Path of the persisted credential slot.
    pub fn store_path(&self) -> PathBuf {
        self.shared.store.slot_path()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for StockDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.shared.lock();
        write!(
            f,
            "StockDashboard(store_dir={}, stocks={}, analyzed={}, credential={})",
            self.shared.store.store_dir.display(),
            session.stocks.len(),
            session.results.len(),
            if session.credential.is_empty() { "unset" } else { "set" }
        )
    }
}
