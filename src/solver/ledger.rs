//! The append-only penalty ledger.
//!
//! Soft rules register each violation event here as a weighted linear
//! expression (typically a single slack variable) plus structured metadata.
//! The driver folds the ledger into the objective and, after solving,
//! resolves every entry to its numeric penalty for reporting.

use good_lp::{Expression, Solution};
use serde::Serialize;
use serde_json::Value;

/// One penalty registration: a linear expression over model variables, a
/// non-negative weight, the name of the rule that produced it, and
/// arbitrary metadata for reporting.
pub struct PenaltyItem {
    /// The penalized expression.
    pub expr: Expression,
    /// Weight applied to the expression's value.
    pub weight: f64,
    /// Name of the source rule.
    pub source: &'static str,
    /// Structured reporting metadata.
    pub meta: Value,
}

/// A ledger entry after the solve, with the expression evaluated against
/// the solution.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedPenalty {
    /// Name of the source rule.
    pub source: String,
    /// Weight applied to the expression's value.
    pub weight: f64,
    /// The expression's value in the solution.
    pub value: f64,
    /// `weight * value`.
    pub penalty: f64,
    /// Structured reporting metadata.
    pub meta: Value,
}

/// Append-only sequence of [`PenaltyItem`]s, keyed implicitly by insertion
/// order.
#[derive(Default)]
pub struct PenaltyLedger {
    items: Vec<PenaltyItem>,
}

impl PenaltyLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry.
    pub fn push(
        &mut self,
        expr: impl Into<Expression>,
        weight: f64,
        source: &'static str,
        meta: Value,
    ) {
        self.items.push(PenaltyItem {
            expr: expr.into(),
            weight,
            source,
            meta,
        });
    }

    /// The entries in insertion order.
    pub fn items(&self) -> &[PenaltyItem] {
        &self.items
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The weighted sum of all entries, for the objective.
    pub fn objective_expression(&self) -> Expression {
        let mut total = Expression::default();
        for item in &self.items {
            total += item.expr.clone() * item.weight;
        }
        total
    }

    /// Evaluates every entry against a solution.
    pub fn resolve(&self, solution: &impl Solution) -> Vec<ResolvedPenalty> {
        self.items
            .iter()
            .map(|item| {
                let value = solution.eval(item.expr.clone());
                ResolvedPenalty {
                    source: item.source.to_string(),
                    weight: item.weight,
                    value,
                    penalty: item.weight * value,
                    meta: item.meta.clone(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use good_lp::ProblemVariables;
    use serde_json::json;

    #[test]
    fn test_push_preserves_order_and_metadata() {
        let mut vars = ProblemVariables::new();
        let a = vars.add(good_lp::variable().binary());
        let b = vars.add(good_lp::variable().binary());

        let mut ledger = PenaltyLedger::new();
        ledger.push(a, 5.0, "soft_night_spacing_pairs", json!({"worker": "W1"}));
        ledger.push(b, 3.0, "soft_night_remote_same_day", json!({"worker": "W2"}));

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.items()[0].source, "soft_night_spacing_pairs");
        assert_eq!(ledger.items()[0].weight, 5.0);
        assert_eq!(ledger.items()[1].meta["worker"], "W2");
    }

    #[test]
    fn test_empty_ledger_has_no_items() {
        let ledger = PenaltyLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert!(ledger.items().is_empty());
    }
}
