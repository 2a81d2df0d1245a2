//! Soft rule: discourage night pairs closer than the soft window.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use good_lp::Variable;
use serde_json::json;

use crate::error::EngineResult;
use crate::models::ShiftKind;
use crate::solver::{ContextKey, PenaltyLedger, RosterModel, SolveContext};

use super::linearize::{and_indicator, or_indicator};
use super::Rule;

/// The hard spacing rule only enforces the minimum gap; this rule rewards
/// spreading nights further apart. For each worker and each pair of
/// candidate night dates with a gap below the soft window, an AND indicator
/// over the two per-date night indicators is penalized with
/// `weight × (window − gap)`, so near pairs cost more than distant ones.
pub struct NightSpacingPairs {
    window: u32,
    weight: f64,
}

impl NightSpacingPairs {
    /// Creates the rule with the configured soft window and unit weight.
    pub fn new(window: u32, weight: f64) -> Self {
        Self { window, weight }
    }
}

impl Rule for NightSpacingPairs {
    fn name(&self) -> &'static str {
        "soft_night_spacing_pairs"
    }

    fn summary(&self) -> &'static str {
        "Spread a worker's nights apart where possible"
    }

    fn requires(&self) -> &'static [ContextKey] {
        &[ContextKey::Calendar]
    }

    fn apply(
        &self,
        model: &mut RosterModel,
        ctx: &SolveContext<'_>,
        ledger: &mut PenaltyLedger,
    ) -> EngineResult<()> {
        if self.weight == 0.0 {
            return Ok(());
        }

        // worker → night date → variables across hospitals
        let mut nights: BTreeMap<&str, BTreeMap<NaiveDate, Vec<Variable>>> = BTreeMap::new();
        for (key, &var) in ctx.variables {
            if key.shift == ShiftKind::Night {
                nights
                    .entry(key.worker.as_str())
                    .or_default()
                    .entry(key.date)
                    .or_default()
                    .push(var);
            }
        }

        for (worker, by_date) in &nights {
            let mut indicators: BTreeMap<NaiveDate, Variable> = BTreeMap::new();
            for (date, vars) in by_date {
                let name = format!("night_ind_{}_{}", worker, date.format("%Y%m%d"));
                indicators.insert(*date, or_indicator(model, name, vars));
            }

            let dates: Vec<NaiveDate> = by_date.keys().copied().collect();
            for (i, &d1) in dates.iter().enumerate() {
                for &d2 in &dates[i + 1..] {
                    let gap = (d2 - d1).num_days() as u32;
                    if gap >= self.window {
                        continue;
                    }
                    let units = self.window - gap;
                    let name = format!(
                        "night_pair_{}_{}_{}",
                        worker,
                        d1.format("%Y%m%d"),
                        d2.format("%Y%m%d")
                    );
                    let z = and_indicator(model, name, indicators[&d1], indicators[&d2]);
                    ledger.push(
                        z,
                        self.weight * f64::from(units),
                        self.name(),
                        json!({
                            "worker": worker,
                            "first": d1.to_string(),
                            "second": d2.to_string(),
                            "gap": gap,
                        }),
                    );
                }
            }
        }
        Ok(())
    }
}
