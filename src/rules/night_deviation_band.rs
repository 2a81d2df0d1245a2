//! Soft rule: keep each worker's night count near the shared target.

use std::collections::BTreeMap;

use good_lp::{constraint, Expression};
use serde_json::json;

use crate::error::EngineResult;
use crate::models::ShiftKind;
use crate::solver::{ContextKey, PenaltyLedger, RosterModel, SolveContext};

use super::Rule;

/// Computes `target = round(night coverage points / active workers)`, where
/// an active worker is one with at least one night candidate variable. For
/// each active worker, non-negative slacks `over` and `under` satisfy
/// `count − target = over − under`; both directions are penalized per unit,
/// steering night load toward an even split.
pub struct NightDeviationBand {
    weight: f64,
}

impl NightDeviationBand {
    /// Creates the rule with the configured per-unit weight.
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Rule for NightDeviationBand {
    fn name(&self) -> &'static str {
        "soft_night_deviation_band"
    }

    fn summary(&self) -> &'static str {
        "Balance night counts across workers"
    }

    fn requires(&self) -> &'static [ContextKey] {
        &[ContextKey::RequiredCoverage]
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

        let night_points = ctx
            .required_coverage
            .iter()
            .filter(|p| p.shift == ShiftKind::Night)
            .count();

        let mut counts: BTreeMap<&str, Expression> = BTreeMap::new();
        for (key, &var) in ctx.variables {
            if key.shift == ShiftKind::Night {
                *counts.entry(key.worker.as_str()).or_default() += var;
            }
        }

        let active = counts.len();
        if active == 0 || night_points == 0 {
            return Ok(());
        }
        let target = (night_points as f64 / active as f64).round();

        for (worker, count) in counts {
            let over = model.add_nonneg(format!("night_dev_over_{worker}"));
            let under = model.add_nonneg(format!("night_dev_under_{worker}"));
            model.push(constraint!(count - over + under == target));

            let meta = json!({"worker": worker, "target": target});
            ledger.push(over, self.weight, self.name(), meta.clone());
            ledger.push(under, self.weight, self.name(), meta);
        }
        Ok(())
    }
}
