//! Insight engine - runs the analysis rules over sales and stock data
//!
//! The engine is a pure function of its two input slices: no I/O, no state
//! carried between runs. Callers re-run it whenever fresh data arrives and
//! the previous result is simply superseded.

use super::types::Insight;
use super::{
    ClientConcentrationRule, ProductConcentrationRule, SalesTrendRule, StockAgingRule,
    StockCoverageRule,
};
use crate::models::{SaleRecord, StockRecord};

/// The data one engine run analyzes
///
/// Borrowed, never mutated; both slices may be empty.
pub struct AnalysisInput<'a> {
    pub sales: &'a [SaleRecord],
    pub stock: &'a [StockRecord],
}

/// Trait for a single analysis rule
///
/// A rule emits at most one insight per run. Unmet preconditions (too few
/// distinct dates, zero denominators, empty input) mean "no insight", never
/// an error.
pub trait InsightRule: Send + Sync {
    /// Stable identifier, used in logging
    fn id(&self) -> &'static str;

    /// Evaluate the rule against the input
    fn evaluate(&self, input: &AnalysisInput<'_>) -> Option<Insight>;
}

/// The main insight engine
///
/// Rules run in registration order and the output preserves that order --
/// the dashboard shows insights in evaluation sequence, not re-sorted by
/// priority.
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Upper bound on insights per run; the list is truncated, never an error
    pub const MAX_INSIGHTS: usize = 5;

    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        let mut engine = Self { rules: vec![] };

        engine.register(Box::new(SalesTrendRule::new()));
        engine.register(Box::new(StockAgingRule::new()));
        engine.register(Box::new(ProductConcentrationRule::new()));
        engine.register(Box::new(StockCoverageRule::new()));
        engine.register(Box::new(ClientConcentrationRule::new()));

        engine
    }

    /// Register an analysis rule
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Run every rule and collect the insights, in rule order
    pub fn analyze(&self, sales: &[SaleRecord], stock: &[StockRecord]) -> Vec<Insight> {
        let input = AnalysisInput { sales, stock };
        let mut insights = Vec::new();

        for rule in &self.rules {
            match rule.evaluate(&input) {
                Some(insight) => {
                    tracing::debug!(
                        rule = rule.id(),
                        priority = insight.priority.as_str(),
                        "Rule produced insight"
                    );
                    insights.push(insight);
                }
                None => {
                    tracing::debug!(rule = rule.id(), "Rule skipped (preconditions not met)");
                }
            }
        }

        insights.truncate(Self::MAX_INSIGHTS);
        insights
    }

    /// Identifiers of the registered rules
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }
}
