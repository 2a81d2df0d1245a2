//! Soft rule: avoid day or AM duty right after a night.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use good_lp::Variable;
use serde_json::json;

use crate::error::EngineResult;
use crate::models::ShiftKind;
use crate::solver::{ContextKey, PenaltyLedger, RosterModel, SolveContext};

use super::linearize::{and_indicator, or_indicator};
use super::Rule;

/// A worker with a night on date `d` and a Day or AM duty on `d + 1` is
/// penalized once per such date, at any hospital.
pub struct NoDutyAfterNight {
    weight: f64,
}

impl NoDutyAfterNight {
    /// Creates the rule with the configured weight.
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Rule for NoDutyAfterNight {
    fn name(&self) -> &'static str {
        "soft_no_duty_after_night"
    }

    fn summary(&self) -> &'static str {
        "Avoid day duty the morning after a night"
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

        let mut nights: BTreeMap<(&str, NaiveDate), Vec<Variable>> = BTreeMap::new();
        let mut day_am: BTreeMap<(&str, NaiveDate), Vec<Variable>> = BTreeMap::new();
        for (key, &var) in ctx.variables {
            let slot = (key.worker.as_str(), key.date);
            match key.shift {
                ShiftKind::Night => nights.entry(slot).or_default().push(var),
                ShiftKind::Day | ShiftKind::Am => day_am.entry(slot).or_default().push(var),
                ShiftKind::Pm => {}
            }
        }

        for ((worker, date), night_vars) in &nights {
            let next = *date + Duration::days(1);
            if !ctx.calendar.contains(next) {
                continue;
            }
            let Some(duty_vars) = day_am.get(&(*worker, next)) else {
                continue;
            };
            let stamp = date.format("%Y%m%d");
            let y_night = or_indicator(
                model,
                format!("night_before_duty_{worker}_{stamp}"),
                night_vars,
            );
            let y_duty = or_indicator(
                model,
                format!("duty_after_night_{worker}_{}", next.format("%Y%m%d")),
                duty_vars,
            );
            let z = and_indicator(
                model,
                format!("night_then_duty_{worker}_{stamp}"),
                y_night,
                y_duty,
            );
            ledger.push(
                z,
                self.weight,
                self.name(),
                json!({
                    "worker": worker,
                    "night_date": date.to_string(),
                    "next_date": next.to_string(),
                }),
            );
        }
        Ok(())
    }
}
