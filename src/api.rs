//! External dashboard backend interface.
//!
//! [`DashboardApi`] is the request/response surface the dashboard consumes.
//! [`HttpApi`] implements it over HTTP against the backend's `/api` routes.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::{AnalysisResult, CredentialCheck, ExportRequest, Stock, StrategyRequest};

/// The backend calls the dashboard depends on.
///
/// Implementations report transport failures and non-success statuses as
/// errors. Deciding what a failure means for session state is the caller's
/// job.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Fetch the full listing (all markets).
    async fn list_stocks(&self) -> Result<Vec<Stock>>;

    /// Ask the backend whether `credential` grants access to the AI endpoint.
    async fn validate_credential(&self, credential: &str) -> Result<CredentialCheck>;

    /// Run the trading analysis for one ticker.
    async fn analyze(&self, ticker: &str) -> Result<AnalysisResult>;

    /// Run the AI strategy for one ticker. The response carries the
    /// `strategic_*` fields.
    async fn strategy(
        &self,
        ticker: &str,
        request: &StrategyRequest,
        credential: &str,
    ) -> Result<AnalysisResult>;

    /// Render stocks and analyses into a spreadsheet payload.
    async fn export(&self, request: &ExportRequest) -> Result<Vec<u8>>;
}

// ---------------------------------------------------------------------------
// HttpApi
// ---------------------------------------------------------------------------

/// `reqwest`-backed [`DashboardApi`].
pub struct HttpApi {
    base_url: Url,
    client: Client,
}

impl HttpApi {
    /// Create a client for the backend rooted at `base_url`
    /// (e.g. `http://localhost:8000/api`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DashboardError::InvalidArgument(format!("base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(DashboardError::InvalidArgument(format!(
                "base URL {base_url} cannot carry a path"
            )));
        }
        let client = Client::builder().timeout(timeout).gzip(true).build()?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Append `segments` to the base path. Each segment is percent-encoded,
    /// so a ticker containing `/`, `?` or `#` stays a single segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Decode a JSON body through `serde_json` so malformed payloads surface as
/// [`DashboardError::Json`] rather than a transport error.
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let body = resp.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl DashboardApi for HttpApi {
    async fn list_stocks(&self) -> Result<Vec<Stock>> {
        let resp = self
            .client
            .get(self.url(&["stocks"]))
            .send()
            .await?
            .error_for_status()?;
        read_json(resp).await
    }

    async fn validate_credential(&self, credential: &str) -> Result<CredentialCheck> {
        let resp = self
            .client
            .get(self.url(&["gemini-test"]))
            .header(config::CREDENTIAL_HEADER, credential)
            .send()
            .await?
            .error_for_status()?;
        read_json(resp).await
    }

    async fn analyze(&self, ticker: &str) -> Result<AnalysisResult> {
        let resp = self
            .client
            .get(self.url(&["trading-analysis", ticker]))
            .send()
            .await?
            .error_for_status()?;
        read_json(resp).await
    }

    async fn strategy(
        &self,
        ticker: &str,
        request: &StrategyRequest,
        credential: &str,
    ) -> Result<AnalysisResult> {
        let resp = self
            .client
            .post(self.url(&["gemini-analyze", ticker]))
            .header(config::CREDENTIAL_HEADER, credential)
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        read_json(resp).await
    }

    async fn export(&self, request: &ExportRequest) -> Result<Vec<u8>> {
        let resp = self
            .client
            .post(self.url(&["export"]))
            .json(request)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.bytes().await?.to_vec())
    }
}
