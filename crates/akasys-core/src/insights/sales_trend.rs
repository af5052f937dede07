//! Sales velocity trend rule
//!
//! Compares the most recent seven sale days against the seven before them.
//! Windows are positional over the distinct dates present in the data, so a
//! gap in the calendar never shrinks a window; the rule simply waits until
//! fourteen distinct dates exist.

use super::engine::{AnalysisInput, InsightRule};
use super::types::{Insight, Priority};
use crate::agg::{distinct_sorted_dates, group_sum};

/// Rule that detects acceleration or decline in sales velocity
pub struct SalesTrendRule {
    /// Number of distinct sale days per comparison window
    window: usize,
}

impl SalesTrendRule {
    pub fn new() -> Self {
        Self { window: 7 }
    }
}

impl Default for SalesTrendRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for SalesTrendRule {
    fn id(&self) -> &'static str {
        "sales_trend"
    }

    fn evaluate(&self, input: &AnalysisInput<'_>) -> Option<Insight> {
        let dates = distinct_sorted_dates(input.sales, |s| s.date);
        if dates.len() < self.window * 2 {
            return None;
        }

        let per_day = group_sum(input.sales, |s| s.date, |s| s.net_weight);

        let recent_dates = &dates[dates.len() - self.window..];
        let prior_dates = &dates[dates.len() - self.window * 2..dates.len() - self.window];

        let recent: f64 = recent_dates.iter().map(|d| per_day[d]).sum();
        let prior: f64 = prior_dates.iter().map(|d| per_day[d]).sum();

        if recent <= 0.0 || prior <= 0.0 {
            return None;
        }

        let change = (recent - prior) / prior * 100.0;

        let priority = if change.abs() > 20.0 {
            Priority::High
        } else if change.abs() > 10.0 {
            Priority::Medium
        } else {
            Priority::Low
        };

        let title = if change >= 0.0 {
            "Sales Acceleration"
        } else {
            "Recent Sales Decline"
        };

        Some(Insight::new(
            title,
            format!(
                "Sales volume moved {:+.1}% over the last {} sale days ({:.1} vs {:.1} net weight)",
                change, self.window, recent, prior
            ),
            priority,
        ))
    }
}
