//! Insight engine for the Akasys dashboard
//!
//! Turns raw sales/stock records into a short, prioritized list of business
//! observations. Five analysis rules run in a fixed order:
//!
//! 1. Sales velocity trend (recent vs prior seven sale days)
//! 2. Stock aging (share of positions past the aging threshold)
//! 3. Product concentration (volume share of the top product)
//! 4. Stock coverage (days of demand the current stock covers)
//! 5. Client concentration (volume share of the top client)
//!
//! Each rule either emits one insight or silently contributes nothing when
//! its preconditions are not met. The output keeps rule order and is capped
//! at five entries.

mod client_concentration;
mod engine;
mod product_concentration;
mod sales_trend;
mod stock_aging;
mod stock_coverage;
mod types;

pub use client_concentration::ClientConcentrationRule;
pub use engine::{AnalysisInput, InsightEngine, InsightRule};
pub use product_concentration::ProductConcentrationRule;
pub use sales_trend::SalesTrendRule;
pub use stock_aging::StockAgingRule;
pub use stock_coverage::StockCoverageRule;
pub use types::{Insight, Priority};
