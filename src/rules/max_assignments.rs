//! Hard rule: per-(worker, hospital) assignment caps.

use std::collections::BTreeMap;

use good_lp::{constraint, Expression};

use crate::error::EngineResult;
use crate::solver::{ContextKey, PenaltyLedger, RosterModel, SolveContext};

use super::Rule;

/// For every capped (worker, hospital) pair, the sum of that worker's
/// variables at that hospital over all dates and shifts stays within the
/// cap. Pairs without a cap row are unbounded.
pub struct MaxAssignmentsPerWorkerHospital;

impl Rule for MaxAssignmentsPerWorkerHospital {
    fn name(&self) -> &'static str {
        "max_assignments_per_worker_hospital"
    }

    fn summary(&self) -> &'static str {
        "Cap each worker's monthly assignments per hospital"
    }

    fn requires(&self) -> &'static [ContextKey] {
        &[ContextKey::Caps]
    }

    fn apply(
        &self,
        model: &mut RosterModel,
        ctx: &SolveContext<'_>,
        _ledger: &mut PenaltyLedger,
    ) -> EngineResult<()> {
        let caps = ctx.caps_for(self.name())?;

        let mut by_pair: BTreeMap<(&str, &str), Expression> = BTreeMap::new();
        for (key, &var) in ctx.variables {
            *by_pair
                .entry((key.worker.as_str(), key.hospital.as_str()))
                .or_default() += var;
        }

        for ((worker, hospital), cap) in caps {
            if let Some(sum) = by_pair.remove(&(worker.as_str(), hospital.as_str())) {
                model.push(constraint!(sum <= *cap as f64));
            }
        }
        Ok(())
    }
}
