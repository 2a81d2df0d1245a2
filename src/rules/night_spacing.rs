//! Hard rule: minimum spacing between a worker's nights.

use std::collections::BTreeMap;

use good_lp::{constraint, Expression, Variable};

use crate::error::EngineResult;
use crate::models::ShiftKind;
use crate::solver::{ContextKey, PenaltyLedger, RosterModel, SolveContext};

use super::Rule;

/// Any two nights of the same worker must be at least `gap` days apart.
///
/// Linearized as a rolling window: for every worker and every window of
/// `gap` consecutive month dates, the sum of the worker's night variables
/// inside the window is at most 1. With `gap` = 2 this forbids
/// back-to-back nights; larger gaps stretch the window accordingly.
pub struct NightSpacingMinimum {
    gap: u32,
}

impl NightSpacingMinimum {
    /// Creates the rule with the configured minimum gap (≥ 1).
    pub fn new(gap: u32) -> Self {
        Self { gap }
    }
}

impl Rule for NightSpacingMinimum {
    fn name(&self) -> &'static str {
        "night_spacing_minimum"
    }

    fn summary(&self) -> &'static str {
        "Keep a minimum number of days between nights"
    }

    fn requires(&self) -> &'static [ContextKey] {
        &[ContextKey::Calendar]
    }

    fn apply(
        &self,
        model: &mut RosterModel,
        ctx: &SolveContext<'_>,
        _ledger: &mut PenaltyLedger,
    ) -> EngineResult<()> {
        let days = ctx.calendar.days();
        let index_of: BTreeMap<_, _> = days
            .iter()
            .enumerate()
            .map(|(i, day)| (day.date, i))
            .collect();

        // worker → day index → night variables across hospitals
        let mut nights: BTreeMap<&str, BTreeMap<usize, Vec<Variable>>> = BTreeMap::new();
        for (key, &var) in ctx.variables {
            if key.shift != ShiftKind::Night {
                continue;
            }
            if let Some(&idx) = index_of.get(&key.date) {
                nights
                    .entry(key.worker.as_str())
                    .or_default()
                    .entry(idx)
                    .or_default()
                    .push(var);
            }
        }

        let gap = self.gap as usize;
        if gap < 2 || days.len() < 2 {
            // A window of one day is already covered by the overlap rule.
            return Ok(());
        }

        for by_index in nights.values() {
            for start in 0..=days.len().saturating_sub(gap) {
                let mut sum = Expression::default();
                let mut count = 0usize;
                for idx in start..start + gap {
                    if let Some(vars) = by_index.get(&idx) {
                        for &var in vars {
                            sum += var;
                            count += 1;
                        }
                    }
                }
                if count >= 2 {
                    model.push(constraint!(sum <= 1.0));
                }
            }
        }
        Ok(())
    }
}
