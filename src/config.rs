//! Engine configuration.
//!
//! Strongly-typed knobs for the optimization run: the hard night-spacing
//! window, the soft night window, per-rule penalty weights, the enabled-rule
//! set, and the optional solver time limit. Collaborators deserialize this
//! from whatever format they load and hand it to [`crate::solve`].

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Penalty weights for the soft rules, one field per rule.
///
/// All weights must be finite and non-negative. The defaults are the
/// operator-tuned values the engine ships with.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RuleWeights {
    /// Per unit of closeness between night pairs inside the soft window.
    pub night_spacing_pairs: f64,
    /// Night plus remote day/PM duty on the same date.
    pub night_remote_same_day: f64,
    /// Per unit of deviation from the per-worker night target.
    pub night_deviation_band: f64,
    /// Per unit of per-weekday non-night imbalance.
    pub weekday_balance: f64,
    /// Day or AM duty the day after a night.
    pub no_duty_after_night: f64,
    /// A desired preference left unassigned.
    pub desired_preferences: f64,
    /// An available preference wasted on unmet coverage.
    pub available_preferences: f64,
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            night_spacing_pairs: 5.0,
            night_remote_same_day: 3.0,
            night_deviation_band: 2.0,
            weekday_balance: 1.0,
            no_duty_after_night: 4.0,
            desired_preferences: 8.0,
            available_preferences: 1.0,
        }
    }
}

impl RuleWeights {
    fn validate(&self) -> EngineResult<()> {
        let named = [
            ("night_spacing_pairs", self.night_spacing_pairs),
            ("night_remote_same_day", self.night_remote_same_day),
            ("night_deviation_band", self.night_deviation_band),
            ("weekday_balance", self.weekday_balance),
            ("no_duty_after_night", self.no_duty_after_night),
            ("desired_preferences", self.desired_preferences),
            ("available_preferences", self.available_preferences),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidConfig {
                    message: format!("weight '{name}' must be finite and non-negative, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Configuration for one optimization run.
///
/// # Example
///
/// ```
/// use roster_engine::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.min_night_gap, 2);
/// assert_eq!(config.soft_night_window, 7);
/// assert!(config.enabled_rules.is_none()); // all rules enabled
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum days between two nights of the same worker (hard rule).
    /// Must be at least 1.
    pub min_night_gap: u32,
    /// Window within which night pairs are softly discouraged. Must be at
    /// least `min_night_gap`.
    pub soft_night_window: u32,
    /// Soft-rule penalty weights.
    pub weights: RuleWeights,
    /// Names of the rules to enable; `None` enables the full registry.
    pub enabled_rules: Option<BTreeSet<String>>,
    /// Wall-clock bound for the solver, in seconds.
    pub solver_time_limit_seconds: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_night_gap: 2,
            soft_night_window: 7,
            weights: RuleWeights::default(),
            enabled_rules: None,
            solver_time_limit_seconds: None,
        }
    }
}

impl EngineConfig {
    /// Checks the configuration's internal consistency.
    ///
    /// Rule-name validation against the registry happens separately in
    /// [`crate::rules::enabled_rules`], which knows the registry contents.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] for a night gap below 1, a
    /// soft window below the gap, a negative or non-finite weight, or a
    /// non-positive time limit.
    pub fn validate(&self) -> EngineResult<()> {
        if self.min_night_gap < 1 {
            return Err(EngineError::InvalidConfig {
                message: format!("min_night_gap must be at least 1, got {}", self.min_night_gap),
            });
        }
        if self.soft_night_window < self.min_night_gap {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "soft_night_window ({}) must be at least min_night_gap ({})",
                    self.soft_night_window, self.min_night_gap
                ),
            });
        }
        self.weights.validate()?;
        if let Some(limit) = self.solver_time_limit_seconds {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(EngineError::InvalidConfig {
                    message: format!("solver_time_limit_seconds must be positive, got {limit}"),
                });
            }
        }
        Ok(())
    }

    /// Whether a rule is enabled under this configuration.
    pub fn rule_enabled(&self, name: &str) -> bool {
        match &self.enabled_rules {
            None => true,
            Some(set) => set.contains(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_default_weights() {
        let weights = RuleWeights::default();
        assert_eq!(weights.night_spacing_pairs, 5.0);
        assert_eq!(weights.night_remote_same_day, 3.0);
        assert_eq!(weights.night_deviation_band, 2.0);
        assert_eq!(weights.weekday_balance, 1.0);
        assert_eq!(weights.no_duty_after_night, 4.0);
        assert_eq!(weights.desired_preferences, 8.0);
        assert_eq!(weights.available_preferences, 1.0);
    }

    #[test]
    fn test_zero_night_gap_rejected() {
        let config = EngineConfig {
            min_night_gap: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_window_below_gap_rejected() {
        let config = EngineConfig {
            min_night_gap: 4,
            soft_night_window: 3,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = EngineConfig::default();
        config.weights.desired_preferences = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_weight_rejected() {
        let mut config = EngineConfig::default();
        config.weights.weekday_balance = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_time_limit_rejected() {
        let config = EngineConfig {
            solver_time_limit_seconds: Some(0.0),
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rule_enabled_with_subset() {
        let config = EngineConfig {
            enabled_rules: Some(BTreeSet::from(["night_spacing_minimum".to_string()])),
            ..EngineConfig::default()
        };
        assert!(config.rule_enabled("night_spacing_minimum"));
        assert!(!config.rule_enabled("no_overlap_same_time"));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = r#"{
            "min_night_gap": 3,
            "weights": { "desired_preferences": 10.0 }
        }"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.min_night_gap, 3);
        assert_eq!(config.soft_night_window, 7);
        assert_eq!(config.weights.desired_preferences, 10.0);
        assert_eq!(config.weights.night_spacing_pairs, 5.0);
    }
}
