//! Dashboard operations.
//!
//! Each module provides a lightweight struct that borrows the dashboard's
//! [`Shared`](crate::session::Shared) core and exposes async operations on it.

pub mod analysis;
pub mod batch;
pub mod credentials;
pub mod export;
pub mod stocks;
pub mod strategy;

pub use analysis::AnalysisClient;
pub use batch::{BatchOutcome, BatchReport, BatchSequencer};
pub use credentials::CredentialSettings;
pub use export::Exporter;
pub use stocks::StockList;
pub use strategy::StrategyClient;
