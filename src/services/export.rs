//! Spreadsheet export of the stock list and accumulated analyses.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::ExportRequest;
use crate::session::Shared;

pub struct Exporter<'a> {
    shared: &'a Shared,
}

impl<'a> Exporter<'a> {
    pub fn new(shared: &'a Shared) -> Self {
        Self { shared }
    }

    /// Build the export body from the session: the full stock list (not the
    /// filtered view) and every analysis record, without transient flags.
    pub fn request(&self) -> ExportRequest {
        let session = self.shared.lock();
        ExportRequest {
            stocks: session.stocks.clone(),
            analysis: session
                .results
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    /// Ask the backend to render the spreadsheet and return its bytes.
    pub async fn export(&self) -> Result<Vec<u8>> {
        let request = self.request();
        if request.stocks.is_empty() {
            return Err(DashboardError::InvalidArgument(
                "no stocks loaded to export".into(),
            ));
        }

        self.shared.lock().exporting = true;
        let outcome = self.shared.api.export(&request).await;
        self.shared.lock().exporting = false;

        if let Err(e) = &outcome {
            warn!(error = %e, "export failed");
        }
        outcome
    }

    /// Export and write the spreadsheet into `dir` as
    /// `stock_analysis_<YYYY-MM-DD>.xlsx` (UTC date). Returns the file path.
    pub async fn export_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let bytes = self.export().await?;
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(config::export_file_name(chrono::Utc::now().date_naive()));
        fs::write(&path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "export written");
        Ok(path)
    }

    pub fn is_exporting(&self) -> bool {
        self.shared.lock().exporting
    }
}
