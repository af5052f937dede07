//! Stock aging rule
//!
//! Flags how much of the current stock has been sitting past the aging
//! threshold (20 days).

use super::engine::{AnalysisInput, InsightRule};
use super::types::{Insight, Priority};

/// Rule that measures the share of aging stock positions
pub struct StockAgingRule {
    /// Days-in-stock cutoff above which a position counts as aging
    aging_threshold: u32,
}

impl StockAgingRule {
    pub fn new() -> Self {
        Self { aging_threshold: 20 }
    }

    pub fn with_threshold(aging_threshold: u32) -> Self {
        Self { aging_threshold }
    }
}

impl Default for StockAgingRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for StockAgingRule {
    fn id(&self) -> &'static str {
        "stock_aging"
    }

    fn evaluate(&self, input: &AnalysisInput<'_>) -> Option<Insight> {
        if input.stock.is_empty() {
            return None;
        }

        let total = input.stock.len();
        let aging = input
            .stock
            .iter()
            .filter(|s| s.days_in_stock > self.aging_threshold)
            .count();
        let ratio = aging as f64 / total as f64;

        let priority = if ratio > 0.5 {
            Priority::High
        } else if ratio > 0.25 {
            Priority::Medium
        } else {
            Priority::Low
        };

        Some(Insight::new(
            "Stock Aging",
            format!(
                "{} of {} stock positions have been in stock for more than {} days ({:.1}%)",
                aging,
                total,
                self.aging_threshold,
                ratio * 100.0
            ),
            priority,
        ))
    }
}
