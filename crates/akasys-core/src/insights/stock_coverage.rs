//! Stock coverage rule
//!
//! Estimates how many days the current stock would last at the recent
//! average daily demand rate. Low coverage is the urgent case here, so the
//! thresholds invert relative to the other rules.

use super::engine::{AnalysisInput, InsightRule};
use super::types::{Insight, Priority};
use crate::agg::distinct_sorted_dates;

pub struct StockCoverageRule;

impl StockCoverageRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StockCoverageRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for StockCoverageRule {
    fn id(&self) -> &'static str {
        "stock_coverage"
    }

    fn evaluate(&self, input: &AnalysisInput<'_>) -> Option<Insight> {
        if input.sales.is_empty() || input.stock.is_empty() {
            return None;
        }

        let total_weight: f64 = input.sales.iter().map(|s| s.net_weight).sum();
        // Minimum 1 so a single-day dataset cannot divide by zero
        let sale_days = distinct_sorted_dates(input.sales, |s| s.date).len().max(1);
        let daily_demand = total_weight / sale_days as f64;
        if daily_demand <= 0.0 {
            return None;
        }

        let total_stock: f64 = input.stock.iter().map(|s| s.total_stock).sum();
        let coverage_days = total_stock / daily_demand;

        let priority = if coverage_days < 5.0 {
            Priority::High
        } else if coverage_days < 10.0 {
            Priority::Medium
        } else {
            Priority::Low
        };

        Some(Insight::new(
            "Stock Coverage",
            format!(
                "Current stock covers an estimated {:.1} days of demand ({:.1} units at {:.1}/day)",
                coverage_days, total_stock, daily_demand
            ),
            priority,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SaleRecord, StockRecord};
    use chrono::NaiveDate;

    fn sale(date: &str, weight: f64) -> SaleRecord {
        SaleRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            client_code: "C1".to_string(),
            product_code: "P1".to_string(),
            net_weight: weight,
        }
    }

    fn stock(total: f64) -> StockRecord {
        StockRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            client_code: "C1".to_string(),
            product_code: "P1".to_string(),
            total_stock: total,
            days_in_stock: 0,
        }
    }

    fn run(sales: &[SaleRecord], stock_rows: &[StockRecord]) -> Option<Insight> {
        StockCoverageRule::new().evaluate(&AnalysisInput { sales, stock: stock_rows })
    }

    /// 100 weight over 10 distinct days (demand 10/day), 30 units: 3 days, high
    #[test]
    fn test_low_coverage_is_high() {
        let sales: Vec<SaleRecord> = (1..=10)
            .map(|day| sale(&format!("2024-01-{:02}", day), 10.0))
            .collect();
        let stock_rows = vec![stock(18.0), stock(12.0)];

        let insight = run(&sales, &stock_rows).unwrap();
        assert_eq!(insight.priority, Priority::High);
        assert!(insight.description.contains("3.0 days"));
    }

    /// Coverage exactly 5.0 is medium (strict `<`)
    #[test]
    fn test_coverage_boundary_is_strict() {
        let sales: Vec<SaleRecord> = (1..=10)
            .map(|day| sale(&format!("2024-01-{:02}", day), 10.0))
            .collect();
        let insight = run(&sales, &[stock(50.0)]).unwrap();
        assert_eq!(insight.priority, Priority::Medium);
    }

    #[test]
    fn test_ample_coverage_is_low() {
        let sales: Vec<SaleRecord> = (1..=10)
            .map(|day| sale(&format!("2024-01-{:02}", day), 10.0))
            .collect();
        let insight = run(&sales, &[stock(250.0)]).unwrap();
        assert_eq!(insight.priority, Priority::Low);
        assert!(insight.description.contains("25.0 days"));
    }

    #[test]
    fn test_zero_demand_skips() {
        let sales = vec![sale("2024-01-01", 0.0)];
        assert!(run(&sales, &[stock(30.0)]).is_none());
    }

    #[test]
    fn test_either_collection_empty_skips() {
        let sales = vec![sale("2024-01-01", 10.0)];
        assert!(run(&sales, &[]).is_none());
        assert!(run(&[], &[stock(30.0)]).is_none());
    }

    /// Duplicate dates collapse when computing daily demand
    #[test]
    fn test_demand_uses_distinct_dates() {
        // 60 weight over 2 distinct dates -> 30/day; 60 units -> 2 days
        let sales = vec![
            sale("2024-01-01", 20.0),
            sale("2024-01-01", 10.0),
            sale("2024-01-02", 30.0),
        ];
        let insight = run(&sales, &[stock(60.0)]).unwrap();
        assert!(insight.description.contains("2.0 days"));
        assert_eq!(insight.priority, Priority::High);
    }
}
