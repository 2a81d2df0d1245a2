//! Soft rule: avoid a night plus remote day/PM duty on the same date.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use good_lp::Variable;
use serde_json::json;

use crate::error::EngineResult;
use crate::models::ShiftKind;
use crate::solver::{ContextKey, PenaltyLedger, RosterModel, SolveContext};

use super::linearize::{and_indicator, or_indicator};
use super::Rule;

/// A worker holding both a night and a remote Day/PM duty on the same date
/// is penalized once per date, via an AND indicator over the two OR
/// indicators.
pub struct NightRemoteSameDay {
    weight: f64,
}

impl NightRemoteSameDay {
    /// Creates the rule with the configured weight.
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Rule for NightRemoteSameDay {
    fn name(&self) -> &'static str {
        "soft_night_remote_same_day"
    }

    fn summary(&self) -> &'static str {
        "Avoid pairing a night with remote day duty on one date"
    }

    fn requires(&self) -> &'static [ContextKey] {
        &[ContextKey::Calendar, ContextKey::Hospitals]
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
        let mut remote_daypm: BTreeMap<(&str, NaiveDate), Vec<Variable>> = BTreeMap::new();
        for (key, &var) in ctx.variables {
            let slot = (key.worker.as_str(), key.date);
            if key.shift == ShiftKind::Night {
                nights.entry(slot).or_default().push(var);
            }
            if remote.contains(key.hospital.as_str())
                && matches!(key.shift, ShiftKind::Day | ShiftKind::Pm)
            {
                remote_daypm.entry(slot).or_default().push(var);
            }
        }

        for ((worker, date), night_vars) in &nights {
            let Some(remote_vars) = remote_daypm.get(&(*worker, *date)) else {
                continue;
            };
            let stamp = date.format("%Y%m%d");
            let y_night = or_indicator(
                model,
                format!("night_same_day_{worker}_{stamp}"),
                night_vars,
            );
            let y_remote = or_indicator(
                model,
                format!("remote_daypm_{worker}_{stamp}"),
                remote_vars,
            );
            let z = and_indicator(
                model,
                format!("night_remote_clash_{worker}_{stamp}"),
                y_night,
                y_remote,
            );
            ledger.push(
                z,
                self.weight,
                self.name(),
                json!({"worker": worker, "date": date.to_string()}),
            );
        }
        Ok(())
    }
}
