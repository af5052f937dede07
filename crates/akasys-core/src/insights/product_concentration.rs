//! Product concentration rule
//!
//! A dependency-risk proxy: how much of the sales volume hangs on a single
//! product code.

use super::engine::{AnalysisInput, InsightRule};
use super::types::{Insight, Priority};
use crate::agg::{group_sum, max_group};

pub struct ProductConcentrationRule;

impl ProductConcentrationRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ProductConcentrationRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for ProductConcentrationRule {
    fn id(&self) -> &'static str {
        "product_concentration"
    }

    fn evaluate(&self, input: &AnalysisInput<'_>) -> Option<Insight> {
        if input.sales.is_empty() {
            return None;
        }

        let by_product = group_sum(input.sales, |s| s.product_code.clone(), |s| s.net_weight);
        let total: f64 = by_product.values().sum();
        if total <= 0.0 {
            return None;
        }

        let (product, max_sum) = max_group(&by_product)?;
        let share = max_sum / total;

        let priority = if share > 0.6 {
            Priority::High
        } else if share > 0.4 {
            Priority::Medium
        } else {
            Priority::Low
        };

        Some(Insight::new(
            "Product Concentration",
            format!(
                "Product {} accounts for {:.1}% of total sales volume",
                product,
                share * 100.0
            ),
            priority,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SaleRecord;
    use chrono::NaiveDate;

    fn sale(product: &str, weight: f64) -> SaleRecord {
        SaleRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            client_code: "C1".to_string(),
            product_code: product.to_string(),
            net_weight: weight,
        }
    }

    fn run(sales: &[SaleRecord]) -> Option<Insight> {
        ProductConcentrationRule::new().evaluate(&AnalysisInput { sales, stock: &[] })
    }

    /// Products {A: 80, B: 20}: A at 80%, high
    #[test]
    fn test_dominant_product_is_high() {
        let sales = vec![sale("A", 50.0), sale("A", 30.0), sale("B", 20.0)];
        let insight = run(&sales).unwrap();
        assert_eq!(insight.priority, Priority::High);
        assert!(insight.description.contains("Product A"));
        assert!(insight.description.contains("80.0%"));
    }

    /// Share exactly 0.6 is medium, not high
    #[test]
    fn test_share_boundary_is_strict() {
        let sales = vec![sale("A", 60.0), sale("B", 40.0)];
        let insight = run(&sales).unwrap();
        assert_eq!(insight.priority, Priority::Medium);
    }

    #[test]
    fn test_even_split_is_low() {
        let sales = vec![sale("A", 25.0), sale("B", 25.0), sale("C", 25.0), sale("D", 25.0)];
        let insight = run(&sales).unwrap();
        assert_eq!(insight.priority, Priority::Low);
    }

    #[test]
    fn test_zero_total_volume_skips() {
        let sales = vec![sale("A", 0.0), sale("B", 0.0)];
        assert!(run(&sales).is_none());
    }

    #[test]
    fn test_empty_sales_skips() {
        assert!(run(&[]).is_none());
    }
}
