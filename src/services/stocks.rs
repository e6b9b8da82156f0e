//! Stock list refresh.

use tracing::{info, warn};

use crate::error::Result;
use crate::session::Shared;

pub struct StockList<'a> {
    shared: &'a Shared,
}

impl<'a> StockList<'a> {
    pub fn new(shared: &'a Shared) -> Self {
        Self { shared }
    }

    /// Fetch the listing and replace the current one.
    ///
    /// On failure the previous list is kept. Returns the number of stocks
    /// now listed.
    pub async fn refresh(&self) -> Result<usize> {
        self.shared.lock().stocks_loading = true;
        let outcome = self.shared.api.list_stocks().await;

        let mut session = self.shared.lock();
        session.stocks_loading = false;
        match outcome {
            Ok(stocks) => {
                session.stocks = stocks;
                info!(count = session.stocks.len(), "stock list refreshed");
                Ok(session.stocks.len())
            }
            Err(e) => {
                warn!(error = %e, "stock list refresh failed");
                Err(e)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.shared.lock().stocks_loading
    }
}
