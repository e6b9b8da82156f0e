#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("No credential configured")]
    CredentialMissing,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
