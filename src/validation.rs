//! Pre-solve validation of the roster input.
//!
//! Structural checks run before any solver work: duplicate names, dangling
//! hospital references, and demand rules missing their date sets are domain
//! errors; caps or preferences naming unknown workers/hospitals are
//! configuration errors, since those maps arrive from configuration-like
//! collaborator files.

use std::collections::BTreeSet;

use crate::error::{EngineError, EngineResult};
use crate::models::{Frequency, RosterInput};

/// Validates the roster input.
///
/// # Errors
///
/// Returns [`EngineError::DomainValidation`] for duplicate hospital or
/// worker names, availability rules or specified days referencing unknown
/// hospitals, and `Biweekly`/`SpecificDays` demand rules without dates;
/// [`EngineError::InvalidConfig`] for cap or preference rows referencing
/// unknown workers or hospitals.
pub fn validate_domain(input: &RosterInput) -> EngineResult<()> {
    let mut hospital_names = BTreeSet::new();
    for hospital in &input.hospitals {
        if !hospital_names.insert(hospital.name.as_str()) {
            return Err(EngineError::DomainValidation {
                message: format!("duplicate hospital name '{}'", hospital.name),
            });
        }
    }

    let mut worker_names = BTreeSet::new();
    for worker in &input.workers {
        if !worker_names.insert(worker.name.as_str()) {
            return Err(EngineError::DomainValidation {
                message: format!("duplicate worker name '{}'", worker.name),
            });
        }
    }

    for hospital in &input.hospitals {
        for (index, rule) in hospital.demand_rules.iter().enumerate() {
            let needs_dates = matches!(rule.frequency, Frequency::Biweekly | Frequency::SpecificDays);
            if needs_dates && rule.dates.is_empty() {
                return Err(EngineError::DomainValidation {
                    message: format!(
                        "demand rule #{index} of hospital '{}' has frequency {:?} but no dates",
                        hospital.name, rule.frequency
                    ),
                });
            }
        }
    }

    for worker in &input.workers {
        for rule in &worker.assignments {
            if !hospital_names.contains(rule.hospital.as_str()) {
                return Err(EngineError::DomainValidation {
                    message: format!(
                        "worker '{}' has an availability rule for unknown hospital '{}'",
                        worker.name, rule.hospital
                    ),
                });
            }
        }
    }

    for specified in &input.specified_days {
        if !hospital_names.contains(specified.hospital.as_str()) {
            return Err(EngineError::DomainValidation {
                message: format!(
                    "specified day {} references unknown hospital '{}'",
                    specified.date, specified.hospital
                ),
            });
        }
    }

    if let Some(caps) = &input.caps {
        for cap in caps {
            if !worker_names.contains(cap.worker.as_str()) {
                return Err(EngineError::InvalidConfig {
                    message: format!("cap references unknown worker '{}'", cap.worker),
                });
            }
            if !hospital_names.contains(cap.hospital.as_str()) {
                return Err(EngineError::InvalidConfig {
                    message: format!("cap references unknown hospital '{}'", cap.hospital),
                });
            }
        }
    }

    if let Some(preferences) = &input.preferences {
        for entry in preferences {
            if !worker_names.contains(entry.worker.as_str()) {
                return Err(EngineError::InvalidConfig {
                    message: format!("preference references unknown worker '{}'", entry.worker),
                });
            }
        }
    }

    Ok(())
}
