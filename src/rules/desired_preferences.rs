//! Soft rule: honor desired preferences.

use good_lp::{constraint, Expression};
use serde_json::json;

use crate::error::EngineResult;
use crate::models::Preference;
use crate::solver::{ContextKey, PenaltyLedger, RosterModel, SolveContext};

use super::Rule;

/// Every (worker, date, shift) marked [`Preference::Desired`] gets a binary
/// slack with `slack + Σ matching vars ≥ 1`: the slack is free exactly when
/// some hospital assigns the wish. A wish with no candidate variable pins
/// its slack to 1, so impossible wishes show up in the ledger instead of
/// silently disappearing.
pub struct DesiredPreferences {
    weight: f64,
}

impl DesiredPreferences {
    /// Creates the rule with the configured weight.
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Rule for DesiredPreferences {
    fn name(&self) -> &'static str {
        "soft_desired_preferences"
    }

    fn summary(&self) -> &'static str {
        "Honor duties workers asked for"
    }

    fn requires(&self) -> &'static [ContextKey] {
        &[ContextKey::Preferences]
    }

    fn apply(
        &self,
        model: &mut RosterModel,
        ctx: &SolveContext<'_>,
        ledger: &mut PenaltyLedger,
    ) -> EngineResult<()> {
        let preferences = ctx.preferences_for(self.name())?;
        if self.weight == 0.0 {
            return Ok(());
        }

        for ((worker, date, shift), preference) in preferences {
            if *preference != Preference::Desired {
                continue;
            }
            let mut sum = Expression::default();
            for (key, &var) in ctx.variables {
                if key.worker == *worker && key.date == *date && key.shift == *shift {
                    sum += var;
                }
            }
            let slack = model.add_binary(format!(
                "desired_missed_{}_{}_{}",
                worker,
                date.format("%Y%m%d"),
                shift.token()
            ));
            model.push(constraint!(sum + slack >= 1.0));
            ledger.push(
                slack,
                self.weight,
                self.name(),
                json!({
                    "worker": worker,
                    "date": date.to_string(),
                    "shift": shift.to_string(),
                }),
            );
        }
        Ok(())
    }
}
