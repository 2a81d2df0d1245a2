//! Hard rule: every required coverage point is staffed by exactly one
//! worker.

use std::collections::BTreeMap;

use good_lp::{constraint, Expression};

use crate::error::EngineResult;
use crate::solver::{ContextKey, CoveragePoint, PenaltyLedger, RosterModel, SolveContext};

use super::Rule;

/// For every (hospital, date, shift) in the required coverage set, the sum
/// of decision variables over that point equals 1.
///
/// A point with no candidate variables yields the constant constraint
/// `0 == 1` and the model is then infeasible, which is exactly the
/// contract: the builder does not repair missing coverage, it reports it.
pub struct OnePersonPerCoveragePoint;

impl Rule for OnePersonPerCoveragePoint {
    fn name(&self) -> &'static str {
        "one_person_per_coverage_point"
    }

    fn summary(&self) -> &'static str {
        "Staff every required coverage point with exactly one worker"
    }

    fn requires(&self) -> &'static [ContextKey] {
        &[ContextKey::RequiredCoverage]
    }

    fn apply(
        &self,
        model: &mut RosterModel,
        ctx: &SolveContext<'_>,
        _ledger: &mut PenaltyLedger,
    ) -> EngineResult<()> {
        let mut by_point: BTreeMap<CoveragePoint, Expression> = BTreeMap::new();
        for (key, &var) in ctx.variables {
            *by_point.entry(key.coverage_point()).or_default() += var;
        }

        for point in ctx.required_coverage {
            let sum = by_point.remove(point).unwrap_or_default();
            model.push(constraint!(sum == 1.0));
        }
        Ok(())
    }
}
