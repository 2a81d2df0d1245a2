//! Soft rule: flag available preferences wasted on unmet coverage.

use std::collections::BTreeMap;

use good_lp::{constraint, Expression};
use serde_json::json;

use crate::error::EngineResult;
use crate::models::Preference;
use crate::solver::{ContextKey, CoveragePoint, PenaltyLedger, RosterModel, SolveContext};

use super::Rule;

/// For each required coverage point where at least one candidate worker
/// explicitly declared [`Preference::Available`], a binary shortage
/// indicator satisfies `Σ point vars + shortage ≥ 1`, and each such
/// preference contributes one ledger entry on the indicator.
///
/// While the coverage rule is enabled the indicator is structurally 0; the
/// rule earns its keep when coverage is disabled or relaxed, pricing unmet
/// demand that a willing worker could have served.
pub struct AvailablePreferences {
    weight: f64,
}

impl AvailablePreferences {
    /// Creates the rule with the configured weight.
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl Rule for AvailablePreferences {
    fn name(&self) -> &'static str {
        "soft_available_preferences"
    }

    fn summary(&self) -> &'static str {
        "Price unmet coverage a willing worker could have served"
    }

    fn requires(&self) -> &'static [ContextKey] {
        &[ContextKey::Preferences, ContextKey::RequiredCoverage]
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

        // point → sum of its vars, and the workers with an explicit Available
        let mut sums: BTreeMap<&CoveragePoint, Expression> = BTreeMap::new();
        let mut willing: BTreeMap<&CoveragePoint, Vec<&str>> = BTreeMap::new();
        for (key, &var) in ctx.variables {
            let point = key.coverage_point();
            let Some(canonical) = ctx.required_coverage.get(&point) else {
                continue;
            };
            *sums.entry(canonical).or_default() += var;
            let lookup = (key.worker.clone(), key.date, key.shift);
            if preferences.get(&lookup) == Some(&Preference::Available) {
                willing
                    .entry(canonical)
                    .or_default()
                    .push(key.worker.as_str());
            }
        }

        for (point, workers) in willing {
            let shortage = model.add_binary(format!(
                "coverage_short_{}_{}_{}",
                point.hospital.replace(' ', "_"),
                point.date.format("%Y%m%d"),
                point.shift.token()
            ));
            let sum = sums.get(point).cloned().unwrap_or_default();
            model.push(constraint!(sum + shortage >= 1.0));
            for worker in workers {
                ledger.push(
                    shortage,
                    self.weight,
                    self.name(),
                    json!({
                        "worker": worker,
                        "hospital": point.hospital,
                        "date": point.date.to_string(),
                        "shift": point.shift.to_string(),
                    }),
                );
            }
        }
        Ok(())
    }
}
