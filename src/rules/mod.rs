//! The constraint registry: hard and soft roster rules.
//!
//! Each rule is an independent object that may add linear constraints to
//! the model under construction and/or append weighted penalty terms to the
//! shared ledger. The registry is a fixed, ordered, declarative list; the
//! configuration selects which rules run, never how they are discovered.
//! Apply order is the registry order, which keeps auxiliary variable naming
//! reproducible across runs.

mod available_preferences;
mod desired_preferences;
mod forbid_remote_after_night;
mod linearize;
mod max_assignments;
mod night_deviation_band;
mod night_remote_same_day;
mod night_spacing;
mod night_spacing_pairs;
mod no_duty_after_night;
mod no_overlap_same_time;
mod one_person_per_coverage;
mod respect_forbidden_preferences;
mod univ_holiday_night_specialist;
mod weekday_balance;

pub use available_preferences::AvailablePreferences;
pub use desired_preferences::DesiredPreferences;
pub use forbid_remote_after_night::ForbidRemoteAfterNight;
pub use linearize::{and_indicator, or_indicator};
pub use max_assignments::MaxAssignmentsPerWorkerHospital;
pub use night_deviation_band::NightDeviationBand;
pub use night_remote_same_day::NightRemoteSameDay;
pub use night_spacing::NightSpacingMinimum;
pub use night_spacing_pairs::NightSpacingPairs;
pub use no_duty_after_night::NoDutyAfterNight;
pub use no_overlap_same_time::NoOverlapSameTime;
pub use one_person_per_coverage::OnePersonPerCoveragePoint;
pub use respect_forbidden_preferences::RespectForbiddenPreferences;
pub use univ_holiday_night_specialist::UnivHolidayNightSpecialist;
pub use weekday_balance::WeekdayBalance;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::solver::{ContextKey, PenaltyLedger, RosterModel, SolveContext};

/// One roster rule.
///
/// `apply` must be pure with respect to the model it receives: it reads the
/// context, adds constraints and ledger entries, and keeps no state of its
/// own between calls.
pub trait Rule {
    /// Stable rule name, used in configuration and penalty sources.
    fn name(&self) -> &'static str;

    /// Short human-readable summary.
    fn summary(&self) -> &'static str;

    /// Context keys the rule reads.
    fn requires(&self) -> &'static [ContextKey];

    /// Adds the rule's constraints and penalty terms.
    fn apply(
        &self,
        model: &mut RosterModel,
        ctx: &SolveContext<'_>,
        ledger: &mut PenaltyLedger,
    ) -> EngineResult<()>;
}

/// The full registry in its fixed order: hard rules first, then soft rules.
pub fn registry(config: &EngineConfig) -> Vec<Box<dyn Rule>> {
    let weights = &config.weights;
    vec![
        Box::new(OnePersonPerCoveragePoint),
        Box::new(NoOverlapSameTime),
        Box::new(RespectForbiddenPreferences),
        Box::new(MaxAssignmentsPerWorkerHospital),
        Box::new(NightSpacingMinimum::new(config.min_night_gap)),
        Box::new(ForbidRemoteAfterNight),
        Box::new(UnivHolidayNightSpecialist),
        Box::new(NightSpacingPairs::new(
            config.soft_night_window,
            weights.night_spacing_pairs,
        )),
        Box::new(NightRemoteSameDay::new(weights.night_remote_same_day)),
        Box::new(NightDeviationBand::new(weights.night_deviation_band)),
        Box::new(WeekdayBalance::new(weights.weekday_balance)),
        Box::new(NoDutyAfterNight::new(weights.no_duty_after_night)),
        Box::new(DesiredPreferences::new(weights.desired_preferences)),
        Box::new(AvailablePreferences::new(weights.available_preferences)),
    ]
}

/// The registry filtered down to the configured rule set, preserving the
/// registry order.
///
/// # Errors
///
/// Returns [`EngineError::InvalidConfig`] when `enabled_rules` names a rule
/// the registry does not contain.
pub fn enabled_rules(config: &EngineConfig) -> EngineResult<Vec<Box<dyn Rule>>> {
    let all = registry(config);
    if let Some(enabled) = &config.enabled_rules {
        for name in enabled {
            if !all.iter().any(|rule| rule.name() == name.as_str()) {
                return Err(EngineError::InvalidConfig {
                    message: format!("enabled_rules names unknown rule '{name}'"),
                });
            }
        }
    }
    Ok(all
        .into_iter()
        .filter(|rule| config.rule_enabled(rule.name()))
        .collect())
}

/// The human-readable summary of a registry rule, for report rendering.
/// Returns the name itself for sources the registry does not know.
pub fn rule_summary(name: &str) -> String {
    registry(&EngineConfig::default())
        .iter()
        .find(|rule| rule.name() == name)
        .map(|rule| rule.summary().to_string())
        .unwrap_or_else(|| name.to_string())
}
