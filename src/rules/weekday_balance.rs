//! Soft rule: balance non-night duty per weekday across workers.

use std::collections::BTreeMap;

use good_lp::{constraint, Expression};
use serde_json::json;

use crate::error::EngineResult;
use crate::models::ShiftKind;
use crate::solver::{ContextKey, PenaltyLedger, RosterModel, SolveContext};

use super::Rule;

/// For each weekday, the mean load is the number of non-night coverage
/// points on that weekday divided by the number of candidate workers. Each
/// candidate worker's non-night count on that weekday gets band slacks
/// `over ≥ count − ⌈mean⌉` and `under ≥ ⌊mean⌋ − count`, both penalized per
/// unit, pushing dispersion toward the mean. Weekdays with at most one
/// candidate have nothing to balance and are skipped.
pub struct WeekdayBalance {
    weight: f64,
}

impl WeekdayBalance {
    /// Creates the rule with the configured per-unit weight.
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Rule for WeekdayBalance {
    fn name(&self) -> &'static str {
        "soft_weekday_balance"
    }

    fn summary(&self) -> &'static str {
        "Balance non-night duty per weekday across workers"
    }

    fn requires(&self) -> &'static [ContextKey] {
        &[ContextKey::Calendar, ContextKey::RequiredCoverage]
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

        // Keyed by days-from-Monday so iteration order is Mon..Sun.
        let mut points_by_weekday: BTreeMap<u32, usize> = BTreeMap::new();
        for point in ctx.required_coverage {
            if point.shift == ShiftKind::Night {
                continue;
            }
            if let Some(day) = ctx.calendar.day(point.date) {
                *points_by_weekday
                    .entry(day.weekday.num_days_from_monday())
                    .or_default() += 1;
            }
        }

        // (weekday, worker) → count expression over non-night variables
        let mut counts: BTreeMap<(u32, &str), Expression> = BTreeMap::new();
        for (key, &var) in ctx.variables {
            if key.shift == ShiftKind::Night {
                continue;
            }
            if let Some(day) = ctx.calendar.day(key.date) {
                *counts
                    .entry((day.weekday.num_days_from_monday(), key.worker.as_str()))
                    .or_default() += var;
            }
        }

        for (weekday_index, total) in points_by_weekday {
            let workers: Vec<&str> = counts
                .keys()
                .filter(|(wd, _)| *wd == weekday_index)
                .map(|(_, w)| *w)
                .collect();
            if workers.len() <= 1 {
                continue;
            }
            let mean = total as f64 / workers.len() as f64;
            let lower = mean.floor();
            let upper = lower + 1.0;
            let weekday = weekday_name(weekday_index);

            for worker in workers {
                let count = counts[&(weekday_index, worker)].clone();
                let over = model.add_nonneg(format!("wd_balance_over_{weekday}_{worker}"));
                let under = model.add_nonneg(format!("wd_balance_under_{weekday}_{worker}"));
                model.push(constraint!(count.clone() - over <= upper));
                model.push(constraint!(count + under >= lower));

                let meta = json!({
                    "worker": worker,
                    "weekday": weekday,
                    "points": total,
                    "lower": lower,
                    "upper": upper,
                });
                ledger.push(over, self.weight, self.name(), meta.clone());
                ledger.push(under, self.weight, self.name(), meta);
            }
        }
        Ok(())
    }
}

fn weekday_name(days_from_monday: u32) -> &'static str {
    match days_from_monday {
        0 => "mon",
        1 => "tue",
        2 => "wed",
        3 => "thu",
        4 => "fri",
        5 => "sat",
        _ => "sun",
    }
}
