//! Hard rule: no remote duty the day after a night.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate};
use good_lp::{constraint, Expression, Variable};

use crate::error::EngineResult;
use crate::models::ShiftKind;
use crate::solver::{ContextKey, PenaltyLedger, RosterModel, SolveContext};

use super::Rule;

/// A worker on night duty cannot take any shift at a remote hospital the
/// following day.
///
/// Linearized pairwise: for each (worker, date) with night candidates, and
/// each remote candidate variable on the next date, the night sum plus that
/// single variable is at most 1. The overlap rule already bounds the night
/// sum at 1, so the pair constraint is exact and does not restrict remote
/// duty on nights the worker does not take.
pub struct ForbidRemoteAfterNight;

impl Rule for ForbidRemoteAfterNight {
    fn name(&self) -> &'static str {
        "forbid_remote_after_night"
    }

    fn summary(&self) -> &'static str {
        "Forbid remote-hospital duty the day after a night"
    }

    fn requires(&self) -> &'static [ContextKey] {
        &[ContextKey::Calendar, ContextKey::Hospitals]
    }

    fn apply(
        &self,
        model: &mut RosterModel,
        ctx: &SolveContext<'_>,
        _ledger: &mut PenaltyLedger,
    ) -> EngineResult<()> {
        let remote: BTreeSet<&str> = ctx
            .hospitals
            .iter()
            .filter(|h| h.is_remote)
            .map(|h| h.name.as_str())
            .collect();
        if remote.is_empty() {
            return Ok(());
        }

        let mut nights: BTreeMap<(&str, NaiveDate), Vec<Variable>> = BTreeMap::new();
        let mut remote_duty: BTreeMap<(&str, NaiveDate), Vec<Variable>> = BTreeMap::new();
        for (key, &var) in ctx.variables {
            if key.shift == ShiftKind::Night {
                nights
                    .entry((key.worker.as_str(), key.date))
                    .or_default()
                    .push(var);
            }
            if remote.contains(key.hospital.as_str()) {
                remote_duty
                    .entry((key.worker.as_str(), key.date))
                    .or_default()
                    .push(var);
            }
        }

        for ((worker, date), night_vars) in &nights {
            let next = *date + Duration::days(1);
            if !ctx.calendar.contains(next) {
                continue;
            }
            let Some(next_remote) = remote_duty.get(&(*worker, next)) else {
                continue;
            };
            for &remote_var in next_remote {
                let mut sum = Expression::from(remote_var);
                for &night_var in night_vars {
                    sum += night_var;
                }
                model.push(constraint!(sum <= 1.0));
            }
        }
        Ok(())
    }
}
