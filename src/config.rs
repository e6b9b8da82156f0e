use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Header carrying the AI credential on outbound requests.
pub const CREDENTIAL_HEADER: &str = "X-Gemini-API-Key";

/// Name of the single persisted slot holding the obfuscated credential.
pub const CREDENTIAL_SLOT: &str = "gemini_api_key";

/// Embedded obfuscation key. Shipped with the client, so not a secret.
pub const OBFUSCATION_KEY: &str = "stock-dashboard-v1-salt";

/// Sentinel the backend uses for "no value".
pub const NOT_AVAILABLE: &str = "N/A";

/// Upper bound on tickers considered by one batch run.
pub const BATCH_LIMIT: usize = 20;

pub const BATCH_DELAY: Duration = Duration::from_millis(500);

/// Rows rendered by the dashboard table.
pub const DISPLAY_LIMIT: usize = 100;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub fn default_store_dir() -> PathBuf {
    if let Some(config) = dirs::config_dir() {
        config.join("stock-dashboard")
    } else {
        PathBuf::from(".stock-dashboard")
    }
}

pub fn export_file_name(date: chrono::NaiveDate) -> String {
    format!("stock_analysis_{}.xlsx", date.format("%Y-%m-%d"))
}
