//! Shared dashboard state.
//!
//! [`Shared`] owns the backend handle, the credential store and the mutable
//! [`Session`]. The session mutex is only held for short synchronous
//! sections and never across an `.await`, so a manual analysis and a running
//! batch can interleave at network boundaries.

use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::broadcast;

use crate::api::DashboardApi;
use crate::models::{AnalysisResult, MarketFilter, MergeMode, Stock, TickerStatus};
use crate::store::CredentialStore;
use crate::view;

/// Outcome of the last credential test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TestStatus {
    #[default]
    Idle,
    Testing,
    Success,
    Failure,
}

/// Signals for the UI layer that sits on top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    /// An AI run was requested without a credential; prompt for one.
    CredentialRequired { ticker: String },
    SettingsOpened,
    SettingsClosed,
}

/// Mutable session state. Lost when the dashboard is dropped, except for the
/// credential, which is mirrored in the [`CredentialStore`].
#[derive(Debug, Default)]
pub struct Session {
    pub stocks: Vec<Stock>,
    pub results: HashMap<String, AnalysisResult>,
    pub statuses: HashMap<String, TickerStatus>,
    pub credential: String,
    pub search: String,
    pub market_filter: MarketFilter,
    pub settings_visible: bool,
    pub test_status: TestStatus,
    pub stocks_loading: bool,
    pub exporting: bool,
}

impl Session {
    pub fn status_mut(&mut self, ticker: &str) -> &mut TickerStatus {
        self.statuses.entry(ticker.to_string()).or_default()
    }

    /// Whether `ticker` already has a usable cached price.
    pub fn has_price(&self, ticker: &str) -> bool {
        self.results.get(ticker).is_some_and(|r| r.has_price())
    }

    pub fn visible_stocks(&self) -> Vec<Stock> {
        view::filter_stocks(&self.stocks, &self.search, self.market_filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn stock_name(&self, ticker: &str) -> Option<String> {
        self.stocks
            .iter()
            .find(|s| s.ticker == ticker)
            .map(|s| s.name.clone())
    }
}

/// Tunables fixed at build time.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub batch_limit: usize,
    pub batch_delay: Duration,
    pub merge_mode: MergeMode,
}

pub struct Shared {
    pub(crate) api: Arc<dyn DashboardApi>,
    pub(crate) store: CredentialStore,
    pub(crate) settings: Settings,
    pub(crate) batch_running: AtomicBool,
    state: Mutex<Session>,
    events: broadcast::Sender<DashboardEvent>,
}

impl Shared {
    pub(crate) fn new(
        api: Arc<dyn DashboardApi>,
        store: CredentialStore,
        settings: Settings,
    ) -> Self {
        let credential = store.load();
        if !credential.is_empty() {
            tracing::debug!("loaded persisted credential");
        }
        let (events, _) = broadcast::channel(64);
        Self {
            api,
            store,
            settings,
            batch_running: AtomicBool::new(false),
            state: Mutex::new(Session {
                credential,
                ..Session::default()
            }),
            events,
        }
    }

    /// Lock the session, ignoring poisoning. No critical section can leave
    /// the state half-written.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Session> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    /// Broadcast an event. Having no subscribers is fine.
    pub(crate) fn emit(&self, event: DashboardEvent) {
        let _ = self.events.send(event);
    }

    pub(crate) fn set_settings_visible(&self, visible: bool) {
        let changed = {
            let mut session = self.lock();
            let changed = session.settings_visible != visible;
            session.settings_visible = visible;
            changed
        };
        if changed {
            self.emit(if visible {
                DashboardEvent::SettingsOpened
            } else {
                DashboardEvent::SettingsClosed
            });
        }
    }
}
