//! `loomledger-finance`: financial aggregation and consistency checking.
//!
//! Pure engine crate: reads a fixture store, returns derived summaries and
//! reports. No CLI or filesystem access beyond loading its own config.

pub mod aggregate;
pub mod alerts;
pub mod breakdown;
pub mod config;
pub mod consistency;
pub mod error;
pub mod export;
pub mod model;
pub mod monthly;
pub mod reports;

pub use aggregate::compute_financials;
pub use alerts::{derive_alerts, Alert, AlertKind};
pub use config::FinanceConfig;
pub use consistency::check_consistency;
pub use error::FinanceError;
pub use model::{ConsistencyReport, ConsistencyStatus, FinancialSummary, Metric};
