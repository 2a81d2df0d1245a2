//! Hard rule: university-hospital nights closing a holiday run need a
//! specialist.

use std::collections::BTreeSet;

use good_lp::{constraint, Expression};

use crate::error::EngineResult;
use crate::models::ShiftKind;
use crate::solver::{ContextKey, CoveragePoint, PenaltyLedger, RosterModel, SolveContext};

use super::Rule;

/// On the last day of a holiday run, the night at a university hospital may
/// only be staffed by a diagnostic specialist: the sum over non-specialist
/// candidates is pinned to 0. Combined with the coverage rule this makes
/// the model infeasible when no specialist is available there, which is
/// the desired outcome since the duty requires one.
pub struct UnivHolidayNightSpecialist;

impl Rule for UnivHolidayNightSpecialist {
    fn name(&self) -> &'static str {
        "university_holiday_night_specialist"
    }

    fn summary(&self) -> &'static str {
        "Reserve holiday-run-closing university nights for specialists"
    }

    fn requires(&self) -> &'static [ContextKey] {
        &[
            ContextKey::Calendar,
            ContextKey::Hospitals,
            ContextKey::Workers,
            ContextKey::RequiredCoverage,
        ]
    }

    fn apply(
        &self,
        model: &mut RosterModel,
        ctx: &SolveContext<'_>,
        _ledger: &mut PenaltyLedger,
    ) -> EngineResult<()> {
        let university: BTreeSet<&str> = ctx
            .hospitals
            .iter()
            .filter(|h| h.is_university)
            .map(|h| h.name.as_str())
            .collect();
        let specialists: BTreeSet<&str> = ctx
            .workers
            .iter()
            .filter(|w| w.is_specialist)
            .map(|w| w.name.as_str())
            .collect();
        if university.is_empty() {
            return Ok(());
        }

        for day in ctx.calendar.days() {
            if !day.is_last_of_holiday_run {
                continue;
            }
            for &hospital in &university {
                let point = CoveragePoint {
                    hospital: hospital.to_string(),
                    date: day.date,
                    shift: ShiftKind::Night,
                };
                if !ctx.required_coverage.contains(&point) {
                    continue;
                }
                let mut non_specialist_sum = Expression::default();
                let mut count = 0usize;
                for (key, &var) in ctx.variables {
                    if key.hospital == hospital
                        && key.date == day.date
                        && key.shift == ShiftKind::Night
                        && !specialists.contains(key.worker.as_str())
                    {
                        non_specialist_sum += var;
                        count += 1;
                    }
                }
                if count > 0 {
                    model.push(constraint!(non_specialist_sum == 0.0));
                }
            }
        }
        Ok(())
    }
}
