//! Penalty aggregation for operator explainability.

use std::collections::BTreeMap;

use serde::Serialize;

use super::ledger::ResolvedPenalty;

/// Aggregated view of the resolved penalty ledger.
#[derive(Debug, Clone, Serialize)]
pub struct PenaltyReport {
    /// Sum of all penalties.
    pub total: f64,
    /// Per-rule totals, highest first.
    pub by_rule: Vec<(String, f64)>,
    /// The heaviest individual items, highest first, capped at the
    /// requested count.
    pub top_items: Vec<ResolvedPenalty>,
}

impl PenaltyReport {
    /// Builds a report from the resolved ledger, keeping the `top_n`
    /// heaviest non-zero items.
    pub fn from_items(items: &[ResolvedPenalty], top_n: usize) -> Self {
        let mut total = 0.0;
        let mut by_rule: BTreeMap<&str, f64> = BTreeMap::new();
        for item in items {
            total += item.penalty;
            *by_rule.entry(item.source.as_str()).or_default() += item.penalty;
        }

        let mut by_rule: Vec<(String, f64)> = by_rule
            .into_iter()
            .map(|(source, penalty)| (source.to_string(), penalty))
            .collect();
        by_rule.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut top_items: Vec<ResolvedPenalty> = items
            .iter()
            .filter(|item| item.penalty != 0.0)
            .cloned()
            .collect();
        top_items.sort_by(|a, b| b.penalty.total_cmp(&a.penalty));
        top_items.truncate(top_n);

        Self {
            total,
            by_rule,
            top_items,
        }
    }

    /// Aggregates penalties by the string value of one metadata field.
    /// Items without that field are skipped.
    pub fn by_meta_field(items: &[ResolvedPenalty], field: &str) -> BTreeMap<String, f64> {
        let mut grouped: BTreeMap<String, f64> = BTreeMap::new();
        for item in items {
            if let Some(value) = item.meta.get(field).and_then(|v| v.as_str()) {
                *grouped.entry(value.to_string()).or_default() += item.penalty;
            }
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(source: &str, weight: f64, value: f64, meta: serde_json::Value) -> ResolvedPenalty {
        ResolvedPenalty {
            source: source.to_string(),
            weight,
            value,
            penalty: weight * value,
            meta,
        }
    }

    #[test]
    fn test_totals_and_rule_ordering() {
        let items = vec![
            item("soft_night_spacing_pairs", 5.0, 3.0, json!({})),
            item("soft_no_duty_after_night", 4.0, 1.0, json!({})),
            item("soft_night_spacing_pairs", 5.0, 0.0, json!({})),
        ];
        let report = PenaltyReport::from_items(&items, 10);
        assert_eq!(report.total, 19.0);
        assert_eq!(report.by_rule[0].0, "soft_night_spacing_pairs");
        assert_eq!(report.by_rule[0].1, 15.0);
        assert_eq!(report.by_rule[1].0, "soft_no_duty_after_night");
        assert_eq!(report.by_rule[1].1, 4.0);
    }

    #[test]
    fn test_top_items_drop_zero_values_and_respect_cap() {
        let items = vec![
            item("a", 1.0, 0.0, json!({})),
            item("b", 2.0, 1.0, json!({})),
            item("c", 9.0, 1.0, json!({})),
            item("d", 4.0, 1.0, json!({})),
        ];
        let report = PenaltyReport::from_items(&items, 2);
        assert_eq!(report.top_items.len(), 2);
        assert_eq!(report.top_items[0].source, "c");
        assert_eq!(report.top_items[1].source, "d");
    }

    #[test]
    fn test_by_meta_field_groups_workers() {
        let items = vec![
            item("a", 2.0, 1.0, json!({"worker": "W1"})),
            item("b", 3.0, 1.0, json!({"worker": "W1"})),
            item("c", 4.0, 1.0, json!({"worker": "W2"})),
            item("d", 5.0, 1.0, json!({"hospital": "H1"})),
        ];
        let grouped = PenaltyReport::by_meta_field(&items, "worker");
        assert_eq!(grouped["W1"], 5.0);
        assert_eq!(grouped["W2"], 4.0);
        assert_eq!(grouped.len(), 2);
    }

    #[test]
    fn test_empty_items_make_empty_report() {
        let report = PenaltyReport::from_items(&[], 5);
        assert_eq!(report.total, 0.0);
        assert!(report.by_rule.is_empty());
        assert!(report.top_items.is_empty());
    }
}
