//! Aggregate dashboard statistics
//!
//! Feeds the dashboard's metric cards: current totals plus a
//! period-over-period delta for each. The "previous period" is the first
//! half of the sorted distinct dates present in the data and the "recent
//! period" is the second half -- the same positional windowing the trend
//! rule uses.
//!
//! Known heuristic limitation, preserved on purpose: the half-split is
//! positional over distinct dates, so irregular gaps produce periods of
//! uneven calendar length. See `test_gappy_dates_split_positionally`.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::agg::{distinct_sorted_dates, percent_change};
use crate::models::{SaleRecord, StockRecord};

/// Current dashboard metrics with period-over-period deltas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Total sales volume (net weight)
    pub total_volume: f64,
    /// Distinct product codes sold
    pub total_products: usize,
    /// Total stock units on hand
    pub total_stock: f64,
    /// Distinct client codes buying
    pub active_clients: usize,
    /// Days of demand the current stock covers; current-only, no
    /// previous-period comparator exists for it
    pub coverage_days: f64,
    pub percent_changes: PercentChanges,
}

/// Deltas against the halved-period baseline, in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentChanges {
    pub total_volume: f64,
    pub total_products: f64,
    pub total_stock: f64,
    pub active_clients: f64,
}

/// Compute the dashboard metric cards from fresh sales/stock data
pub fn dashboard_stats(sales: &[SaleRecord], stock: &[StockRecord]) -> DashboardStats {
    let (recent_sales, previous_sales) = split_by_date_halves(sales, |s| s.date);
    let (recent_stock, previous_stock) = split_by_date_halves(stock, |s| s.date);

    let total_volume: f64 = sales.iter().map(|s| s.net_weight).sum();
    let total_products = distinct_count(sales, |s| s.product_code.as_str());
    let active_clients = distinct_count(sales, |s| s.client_code.as_str());
    let total_stock: f64 = stock.iter().map(|s| s.total_stock).sum();

    let sale_days = distinct_sorted_dates(sales, |s| s.date).len().max(1);
    let daily_demand = total_volume / sale_days as f64;
    let coverage_days = if daily_demand > 0.0 {
        total_stock / daily_demand
    } else {
        0.0
    };

    let percent_changes = PercentChanges {
        total_volume: percent_change(
            recent_sales.iter().map(|s| s.net_weight).sum(),
            previous_sales.iter().map(|s| s.net_weight).sum(),
        ),
        total_products: percent_change(
            distinct_count(&recent_sales, |s| s.product_code.as_str()) as f64,
            distinct_count(&previous_sales, |s| s.product_code.as_str()) as f64,
        ),
        total_stock: percent_change(
            recent_stock.iter().map(|s| s.total_stock).sum(),
            previous_stock.iter().map(|s| s.total_stock).sum(),
        ),
        active_clients: percent_change(
            distinct_count(&recent_sales, |s| s.client_code.as_str()) as f64,
            distinct_count(&previous_sales, |s| s.client_code.as_str()) as f64,
        ),
    };

    DashboardStats {
        total_volume,
        total_products,
        total_stock,
        active_clients,
        coverage_days,
        percent_changes,
    }
}

/// Partition rows into (recent, previous) by halving the distinct date list
///
/// With fewer than two distinct dates everything lands in the recent half
/// and the baseline is empty, which the percent-change convention treats as
/// a +100% increase when the current value is positive.
fn split_by_date_halves<T: Clone>(
    rows: &[T],
    date: impl Fn(&T) -> NaiveDate + Copy,
) -> (Vec<T>, Vec<T>) {
    let dates = distinct_sorted_dates(rows, date);
    let mid = dates.len() / 2;
    let previous_dates: HashSet<NaiveDate> = dates[..mid].iter().copied().collect();

    let mut recent = Vec::new();
    let mut previous = Vec::new();
    for row in rows {
        if previous_dates.contains(&date(row)) {
            previous.push(row.clone());
        } else {
            recent.push(row.clone());
        }
    }
    (recent, previous)
}

fn distinct_count<'a, T>(rows: &'a [T], key: impl Fn(&'a T) -> &'a str) -> usize {
    rows.iter().map(key).collect::<HashSet<_>>().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sale(date: &str, client: &str, product: &str, weight: f64) -> SaleRecord {
        SaleRecord {
            date: d(date),
            client_code: client.to_string(),
            product_code: product.to_string(),
            net_weight: weight,
        }
    }

    fn stock(date: &str, total: f64) -> StockRecord {
        StockRecord {
            date: d(date),
            client_code: "C1".to_string(),
            product_code: "P1".to_string(),
            total_stock: total,
            days_in_stock: 0,
        }
    }

    #[test]
    fn test_empty_inputs_are_all_zero() {
        let stats = dashboard_stats(&[], &[]);
        assert_eq!(stats.total_volume, 0.0);
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.active_clients, 0);
        assert_eq!(stats.total_stock, 0.0);
        assert_eq!(stats.coverage_days, 0.0);
        assert_eq!(stats.percent_changes.total_volume, 0.0);
    }

    #[test]
    fn test_volume_delta_across_halves() {
        // 4 distinct dates: first two carry 100, last two carry 150
        let sales = vec![
            sale("2024-01-01", "C1", "P1", 100.0),
            sale("2024-01-02", "C1", "P1", 100.0),
            sale("2024-01-03", "C1", "P1", 150.0),
            sale("2024-01-04", "C1", "P1", 150.0),
        ];
        let stats = dashboard_stats(&sales, &[]);
        assert_eq!(stats.total_volume, 500.0);
        assert_eq!(stats.percent_changes.total_volume, 50.0);
    }

    #[test]
    fn test_distinct_counts_and_deltas() {
        // Previous half: 1 client, 1 product. Recent half: 2 clients, 2 products.
        let sales = vec![
            sale("2024-01-01", "C1", "P1", 10.0),
            sale("2024-01-02", "C1", "P1", 10.0),
            sale("2024-01-03", "C1", "P1", 10.0),
            sale("2024-01-04", "C2", "P2", 10.0),
        ];
        let stats = dashboard_stats(&sales, &[]);
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.active_clients, 2);
        assert_eq!(stats.percent_changes.total_products, 100.0);
        assert_eq!(stats.percent_changes.active_clients, 100.0);
    }

    #[test]
    fn test_single_date_baseline_is_zero_special_case() {
        let sales = vec![sale("2024-01-01", "C1", "P1", 40.0)];
        let stats = dashboard_stats(&sales, &[]);
        // One distinct date: nothing in the previous half, +100% convention
        assert_eq!(stats.percent_changes.total_volume, 100.0);
    }

    #[test]
    fn test_coverage_days_current_only() {
        // 100 weight over 10 days -> demand 10/day; 30 units -> 3 days
        let sales: Vec<SaleRecord> = (1..=10)
            .map(|day| sale(&format!("2024-01-{:02}", day), "C1", "P1", 10.0))
            .collect();
        let stock_rows = vec![stock("2024-01-10", 30.0)];
        let stats = dashboard_stats(&sales, &stock_rows);
        assert_eq!(stats.coverage_days, 3.0);
    }

    #[test]
    fn test_stock_delta_uses_stock_dates() {
        let stock_rows = vec![
            stock("2024-01-01", 100.0),
            stock("2024-01-02", 80.0),
            stock("2024-01-03", 60.0),
            stock("2024-01-04", 40.0),
        ];
        let stats = dashboard_stats(&[], &stock_rows);
        assert_eq!(stats.total_stock, 280.0);
        // Recent half 100 vs previous half 180
        let expected = (100.0 - 180.0) / 180.0 * 100.0;
        assert!((stats.percent_changes.total_stock - expected).abs() < 1e-9);
    }

    /// The half-split is positional: gappy dates produce uneven calendar
    /// periods, and that is the documented behavior.
    #[test]
    fn test_gappy_dates_split_positionally() {
        // Three distinct dates spanning two months; mid = 1, so only the
        // oldest date forms the previous period.
        let sales = vec![
            sale("2024-01-01", "C1", "P1", 100.0),
            sale("2024-02-27", "C1", "P1", 60.0),
            sale("2024-02-28", "C1", "P1", 60.0),
        ];
        let stats = dashboard_stats(&sales, &[]);
        assert_eq!(stats.percent_changes.total_volume, 20.0); // 120 vs 100
    }
}
