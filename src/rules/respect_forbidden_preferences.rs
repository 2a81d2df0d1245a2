//! Hard rule: forbidden preferences pin their variables to zero.

use good_lp::constraint;

use crate::error::EngineResult;
use crate::models::Preference;
use crate::solver::{ContextKey, PenaltyLedger, RosterModel, SolveContext};

use super::Rule;

/// Every decision variable matching a (worker, date, shift) the worker
/// marked [`Preference::Forbidden`] is forced to 0, at every hospital.
pub struct RespectForbiddenPreferences;

impl Rule for RespectForbiddenPreferences {
    fn name(&self) -> &'static str {
        "respect_forbidden_preferences"
    }

    fn summary(&self) -> &'static str {
        "Never assign a duty the worker marked forbidden"
    }

    fn requires(&self) -> &'static [ContextKey] {
        &[ContextKey::Preferences]
    }

    fn apply(
        &self,
        model: &mut RosterModel,
        ctx: &SolveContext<'_>,
        _ledger: &mut PenaltyLedger,
    ) -> EngineResult<()> {
        let preferences = ctx.preferences_for(self.name())?;
        for (key, &var) in ctx.variables {
            let lookup = (key.worker.clone(), key.date, key.shift);
            if preferences.get(&lookup) == Some(&Preference::Forbidden) {
                model.push(constraint!(var == 0.0));
            }
        }
        Ok(())
    }
}
