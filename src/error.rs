//! Error types for the roster optimization engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions that can occur while building or solving a
//! roster model.

use thiserror::Error;

use crate::solver::CoverageDiagnostic;

/// The main error type for the roster engine.
///
/// All fallible operations in the engine return this error type. The
/// variants mirror the stages of a solve: configuration checks, domain
/// validation, and solver outcomes.
///
/// # Example
///
/// ```
/// use roster_engine::error::EngineError;
///
/// let error = EngineError::InvalidConfig {
///     message: "min_night_gap must be at least 1".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid configuration: min_night_gap must be at least 1"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine configuration is invalid (bad weight, bad gap, unknown
    /// rule name, or a cap/preference referencing an unknown name).
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of what is wrong with the configuration.
        message: String,
    },

    /// An enabled rule requires context data the caller did not supply.
    #[error("Rule '{rule}' requires context data '{key}' which was not supplied")]
    MissingContext {
        /// The name of the rule whose requirement is unmet.
        rule: String,
        /// The missing context key.
        key: String,
    },

    /// The domain input is structurally invalid (duplicate names, dangling
    /// hospital references, demand rules without their date sets).
    #[error("Domain validation failed: {message}")]
    DomainValidation {
        /// A description of the structural problem.
        message: String,
    },

    /// The solver proved the model infeasible.
    ///
    /// Carries the coverage points the variable builder identified as the
    /// likely binding: every required coverage point with at most one
    /// candidate worker.
    #[error("Model is infeasible ({} tightly constrained coverage points)", .diagnostics.len())]
    Infeasible {
        /// Coverage points with zero or one candidate worker.
        diagnostics: Vec<CoverageDiagnostic>,
    },

    /// The solver failed: unbounded model, backend error, or a variable
    /// that did not read back as a binary value.
    #[error("Solver failure ({status}): {message}")]
    SolverFailure {
        /// The failure classification.
        status: crate::solver::SolveStatus,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_displays_message() {
        let error = EngineError::InvalidConfig {
            message: "weight must be non-negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration: weight must be non-negative"
        );
    }

    #[test]
    fn test_missing_context_displays_rule_and_key() {
        let error = EngineError::MissingContext {
            rule: "respect_forbidden_preferences".to_string(),
            key: "preferences".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Rule 'respect_forbidden_preferences' requires context data 'preferences' \
             which was not supplied"
        );
    }

    #[test]
    fn test_domain_validation_displays_message() {
        let error = EngineError::DomainValidation {
            message: "duplicate hospital name 'Central'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Domain validation failed: duplicate hospital name 'Central'"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_config_error() -> EngineResult<()> {
            Err(EngineError::InvalidConfig {
                message: "test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_config_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
