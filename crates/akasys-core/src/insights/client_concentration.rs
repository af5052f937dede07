//! Client concentration rule
//!
//! Same dependency-risk shape as product concentration, over `client_code`,
//! with tighter thresholds: losing a client hurts more than retiring a
//! product line.

use super::engine::{AnalysisInput, InsightRule};
use super::types::{Insight, Priority};
use crate::agg::{group_sum, max_group};

pub struct ClientConcentrationRule;

impl ClientConcentrationRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClientConcentrationRule {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightRule for ClientConcentrationRule {
    fn id(&self) -> &'static str {
        "client_concentration"
    }

    fn evaluate(&self, input: &AnalysisInput<'_>) -> Option<Insight> {
        if input.sales.is_empty() {
            return None;
        }

        let by_client = group_sum(input.sales, |s| s.client_code.clone(), |s| s.net_weight);
        let total: f64 = by_client.values().sum();
        if total <= 0.0 {
            return None;
        }

        let client_count = by_client.len();
        let (client, max_sum) = max_group(&by_client)?;
        let share = max_sum / total;

        let priority = if share > 0.5 {
            Priority::High
        } else if share > 0.35 {
            Priority::Medium
        } else {
            Priority::Low
        };

        Some(Insight::new(
            "Client Concentration",
            format!(
                "Client {} accounts for {:.1}% of sales volume across {} active clients",
                client,
                share * 100.0,
                client_count
            ),
            priority,
        ))
    }
}
