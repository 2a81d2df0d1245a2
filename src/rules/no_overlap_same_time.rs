//! Hard rule: no worker holds two time-overlapping duties on one date.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use good_lp::{constraint, Expression, Variable};

use crate::error::EngineResult;
use crate::models::ShiftKind;
use crate::solver::{ContextKey, PenaltyLedger, RosterModel, SolveContext};

use super::Rule;

/// Per worker and date: at most one duty of each shift kind across all
/// hospitals, and additionally at most one duty among Day∪AM and among
/// Day∪PM, because a full day overlaps both half days. AM plus PM on the
/// same date remains allowed.
pub struct NoOverlapSameTime;

impl Rule for NoOverlapSameTime {
    fn name(&self) -> &'static str {
        "no_overlap_same_time"
    }

    fn summary(&self) -> &'static str {
        "Forbid overlapping duties for a worker at the same time"
    }

    fn requires(&self) -> &'static [ContextKey] {
        &[]
    }

    fn apply(
        &self,
        model: &mut RosterModel,
        ctx: &SolveContext<'_>,
        _ledger: &mut PenaltyLedger,
    ) -> EngineResult<()> {
        let mut by_worker_date: BTreeMap<(&str, NaiveDate), Vec<(ShiftKind, Variable)>> =
            BTreeMap::new();
        for (key, &var) in ctx.variables {
            by_worker_date
                .entry((key.worker.as_str(), key.date))
                .or_default()
                .push((key.shift, var));
        }

        for entries in by_worker_date.values() {
            for shift in ShiftKind::ALL {
                push_at_most_one(
                    model,
                    entries.iter().filter(|(s, _)| *s == shift).map(|(_, v)| *v),
                );
            }
            push_at_most_one(
                model,
                entries
                    .iter()
                    .filter(|(s, _)| matches!(s, ShiftKind::Day | ShiftKind::Am))
                    .map(|(_, v)| *v),
            );
            push_at_most_one(
                model,
                entries
                    .iter()
                    .filter(|(s, _)| matches!(s, ShiftKind::Day | ShiftKind::Pm))
                    .map(|(_, v)| *v),
            );
        }
        Ok(())
    }
}

fn push_at_most_one(model: &mut RosterModel, vars: impl Iterator<Item = Variable>) {
    let mut sum = Expression::default();
    let mut count = 0usize;
    for var in vars {
        sum += var;
        count += 1;
    }
    // A single variable is already bounded by its binary domain.
    if count >= 2 {
        model.push(constraint!(sum <= 1.0));
    }
}
