//! The typed context shared by every rule.
//!
//! Rules declare which context keys they need; a validation pass checks the
//! declared keys against the populated context before any rule runs, and
//! the accessors double as guarded lookups so a rule can never silently
//! read absent data.

use std::collections::{BTreeMap, BTreeSet};

use good_lp::Variable;

use crate::calendar::MonthCalendar;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{CapMap, Hospital, PreferenceMap, Worker};

use super::variables::{CoveragePoint, VarKey};

/// The pieces of context a rule may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKey {
    /// The month calendar.
    Calendar,
    /// The hospital list.
    Hospitals,
    /// The worker list.
    Workers,
    /// The required coverage set.
    RequiredCoverage,
    /// The preference map (optional input).
    Preferences,
    /// The cap map (optional input).
    Caps,
}

impl ContextKey {
    /// The key's name as used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            ContextKey::Calendar => "calendar",
            ContextKey::Hospitals => "hospitals",
            ContextKey::Workers => "workers",
            ContextKey::RequiredCoverage => "required_coverage",
            ContextKey::Preferences => "preferences",
            ContextKey::Caps => "caps",
        }
    }
}

/// Read-only context handed to every rule's `apply`.
///
/// `preferences` and `caps` mirror the optionality of the roster input;
/// everything else is always populated by the driver.
pub struct SolveContext<'a> {
    /// The month calendar.
    pub calendar: &'a MonthCalendar,
    /// Hospitals, in input order.
    pub hospitals: &'a [Hospital],
    /// Workers, in input order.
    pub workers: &'a [Worker],
    /// The materialized decision variables, keyed and ordered by [`VarKey`].
    pub variables: &'a BTreeMap<VarKey, Variable>,
    /// Coverage points that must be staffed.
    pub required_coverage: &'a BTreeSet<CoveragePoint>,
    /// Folded preferences, when the collaborator supplied them.
    pub preferences: Option<&'a PreferenceMap>,
    /// Folded caps, when the collaborator supplied them.
    pub caps: Option<&'a CapMap>,
    /// The engine configuration.
    pub config: &'a EngineConfig,
}

impl<'a> SolveContext<'a> {
    /// Whether a context key is populated.
    pub fn has(&self, key: ContextKey) -> bool {
        match key {
            ContextKey::Preferences => self.preferences.is_some(),
            ContextKey::Caps => self.caps.is_some(),
            _ => true,
        }
    }

    /// Checks that every key a rule declares is populated.
    pub fn ensure_requires(&self, rule: &str, requires: &[ContextKey]) -> EngineResult<()> {
        for key in requires {
            if !self.has(*key) {
                return Err(EngineError::MissingContext {
                    rule: rule.to_string(),
                    key: key.name().to_string(),
                });
            }
        }
        Ok(())
    }

    /// The preference map, or a missing-context error naming `rule`.
    pub fn preferences_for(&self, rule: &str) -> EngineResult<&'a PreferenceMap> {
        self.preferences.ok_or_else(|| EngineError::MissingContext {
            rule: rule.to_string(),
            key: ContextKey::Preferences.name().to_string(),
        })
    }

    /// The cap map, or a missing-context error naming `rule`.
    pub fn caps_for(&self, rule: &str) -> EngineResult<&'a CapMap> {
        self.caps.ok_or_else(|| EngineError::MissingContext {
            rule: rule.to_string(),
            key: ContextKey::Caps.name().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture<'a>(
        calendar: &'a MonthCalendar,
        variables: &'a BTreeMap<VarKey, Variable>,
        required: &'a BTreeSet<CoveragePoint>,
        config: &'a EngineConfig,
    ) -> SolveContext<'a> {
        SolveContext {
            calendar,
            hospitals: &[],
            workers: &[],
            variables,
            required_coverage: required,
            preferences: None,
            caps: None,
            config,
        }
    }

    #[test]
    fn test_missing_preferences_detected() {
        let calendar = MonthCalendar::build(2025, 10, &BTreeSet::new()).unwrap();
        let variables = BTreeMap::new();
        let required = BTreeSet::new();
        let config = EngineConfig::default();
        let ctx = fixture(&calendar, &variables, &required, &config);

        assert!(ctx.has(ContextKey::Calendar));
        assert!(!ctx.has(ContextKey::Preferences));

        let err = ctx
            .ensure_requires("respect_forbidden_preferences", &[ContextKey::Preferences])
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingContext { .. }));
    }

    #[test]
    fn test_populated_keys_pass() {
        let calendar = MonthCalendar::build(2025, 10, &BTreeSet::new()).unwrap();
        let variables = BTreeMap::new();
        let required = BTreeSet::new();
        let config = EngineConfig::default();
        let prefs = PreferenceMap::new();
        let mut ctx = fixture(&calendar, &variables, &required, &config);
        ctx.preferences = Some(&prefs);

        ctx.ensure_requires(
            "respect_forbidden_preferences",
            &[ContextKey::Calendar, ContextKey::Preferences],
        )
        .unwrap();
        assert!(ctx.preferences_for("x").is_ok());
        assert!(ctx.caps_for("x").is_err());
    }
}
