//! Shared test fixtures for the stock dashboard integration tests.
//!
//! Provides `MockApi`, a scripted in-memory [`DashboardApi`] that records every
//! call, and `setup()` which builds a dashboard on top of it with a temporary
//! store directory.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stock_dashboard::models::{CredentialCheck, ExportRequest, StrategyRequest};
use stock_dashboard::{
    AnalysisResult, DashboardApi, DashboardError, Market, Result, Stock, StockDashboard,
    StockDashboardBuilder,
};
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListStocks,
    Validate(String),
    Analyze(String),
    Strategy {
        ticker: String,
        body: serde_json::Value,
        credential: String,
    },
    Export(ExportRequest),
}

/// Scripted backend. Unscripted tickers analyze to a record priced `"1,000"`.
#[derive(Default)]
pub struct MockApi {
    pub stocks: Mutex<Vec<Stock>>,
    pub stocks_fail: Mutex<bool>,
    pub analyses: Mutex<HashMap<String, AnalysisResult>>,
    pub failing: Mutex<HashSet<String>>,
    pub strategy_response: Mutex<Option<AnalysisResult>>,
    pub valid_credentials: Mutex<HashSet<String>>,
    pub validate_fail: Mutex<bool>,
    pub export_payload: Mutex<Vec<u8>>,
    pub latency: Mutex<Duration>,
    pub calls: Mutex<Vec<Call>>,
    pub analyze_times: Mutex<Vec<(String, Instant)>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_stocks(stocks: Vec<Stock>) -> Arc<Self> {
        let api = Self::default();
        *api.stocks.lock().unwrap() = stocks;
        Arc::new(api)
    }

    pub fn script_analysis(&self, ticker: &str, result: AnalysisResult) {
        self.analyses.lock().unwrap().insert(ticker.to_string(), result);
    }

    pub fn fail_ticker(&self, ticker: &str) {
        self.failing.lock().unwrap().insert(ticker.to_string());
    }

    pub fn script_strategy(&self, result: Option<AnalysisResult>) {
        *self.strategy_response.lock().unwrap() = result;
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn analyzed_tickers(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Analyze(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn wait(&self) {
        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

/// Transport-level failure, as a refused connection would surface.
fn unavailable(message: &str) -> DashboardError {
    DashboardError::Io(io::Error::new(io::ErrorKind::ConnectionRefused, message))
}

#[async_trait]
impl DashboardApi for MockApi {
    async fn list_stocks(&self) -> Result<Vec<Stock>> {
        self.record(Call::ListStocks);
        self.wait().await;
        if *self.stocks_fail.lock().unwrap() {
            return Err(unavailable("stocks unavailable"));
        }
        Ok(self.stocks.lock().unwrap().clone())
    }

    async fn validate_credential(&self, credential: &str) -> Result<CredentialCheck> {
        self.record(Call::Validate(credential.to_string()));
        self.wait().await;
        if *self.validate_fail.lock().unwrap() {
            return Err(unavailable("connection refused"));
        }
        Ok(CredentialCheck {
            success: self.valid_credentials.lock().unwrap().contains(credential),
            error: None,
        })
    }

    async fn analyze(&self, ticker: &str) -> Result<AnalysisResult> {
        self.record(Call::Analyze(ticker.to_string()));
        self.analyze_times
            .lock()
            .unwrap()
            .push((ticker.to_string(), Instant::now()));
        self.wait().await;
        if self.failing.lock().unwrap().contains(ticker) {
            return Err(unavailable(&format!("scripted failure for {ticker}")));
        }
        Ok(self
            .analyses
            .lock()
            .unwrap()
            .get(ticker)
            .cloned()
            .unwrap_or_else(|| priced("1,000")))
    }

    async fn strategy(
        &self,
        ticker: &str,
        request: &StrategyRequest,
        credential: &str,
    ) -> Result<AnalysisResult> {
        self.record(Call::Strategy {
            ticker: ticker.to_string(),
            body: serde_json::to_value(request).unwrap(),
            credential: credential.to_string(),
        });
        self.wait().await;
        self.strategy_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| unavailable("AI endpoint unavailable"))
    }

    async fn export(&self, request: &ExportRequest) -> Result<Vec<u8>> {
        self.record(Call::Export(request.clone()));
        self.wait().await;
        Ok(self.export_payload.lock().unwrap().clone())
    }
}

/// Build a dashboard over `api` with a fresh temporary store directory.
///
/// The caller must keep the `TempDir` alive for the duration of the test.
pub fn setup(api: Arc<MockApi>) -> (StockDashboard, tempfile::TempDir) {
    setup_with(api, |b| b)
}

pub fn setup_with(
    api: Arc<MockApi>,
    configure: impl FnOnce(StockDashboardBuilder) -> StockDashboardBuilder,
) -> (StockDashboard, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let builder = StockDashboard::builder()
        .store_dir(tmp_dir.path())
        .api(api);
    let dashboard = configure(builder).build().unwrap();
    (dashboard, tmp_dir)
}

pub fn stock(ticker: &str, name: &str, market: Market) -> Stock {
    Stock {
        ticker: ticker.to_string(),
        name: name.to_string(),
        market,
    }
}

/// `n` stocks with tickers `000001..`, alternating KOSPI/KOSDAQ.
pub fn numbered_stocks(n: usize) -> Vec<Stock> {
    (1..=n)
        .map(|i| {
            let market = if i % 2 == 1 { Market::Kospi } else { Market::Kosdaq };
            stock(&format!("{i:06}"), &format!("Company {i}"), market)
        })
        .collect()
}

pub fn sample_stocks() -> Vec<Stock> {
    vec![
        stock("005930", "삼성전자", Market::Kospi),
        stock("000660", "SK하이닉스", Market::Kospi),
        stock("035720", "Kakao", Market::Kospi),
        stock("247540", "에코프로비엠", Market::Kosdaq),
        stock("091990", "셀트리온헬스케어", Market::Kosdaq),
    ]
}

pub fn priced(price: &str) -> AnalysisResult {
    AnalysisResult {
        current_price: Some(price.to_string()),
        ..AnalysisResult::default()
    }
}
