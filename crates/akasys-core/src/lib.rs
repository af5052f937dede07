//! Akasys Core Library
//!
//! Shared functionality for the Akasys sales & inventory dashboard:
//! - Typed sale/stock records resolved from the backend's wire format
//! - The insight engine (five analysis rules over sales/stock data)
//! - Aggregate dashboard statistics with period-over-period deltas
//! - HTTP client for the upstream Akasys backend API
//! - CSV ingestion for local vendas/estoque exports
//! - Layered configuration (config file + environment overrides)

pub mod agg;
pub mod api;
pub mod config;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod stats;

/// Test utilities including the mock backend server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use api::BackendClient;
pub use config::Config;
pub use error::{Error, Result};
pub use insights::{AnalysisInput, Insight, InsightEngine, InsightRule, Priority};
pub use models::{EstoqueRow, SaleRecord, StockRecord, VendaRow};
pub use stats::{DashboardStats, PercentChanges};
