//! Worker model: availability rules and the specialist flag.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::shift::ShiftKind;

/// A positive-availability statement for a worker.
///
/// A worker may be assigned to `hospital` on any of `weekdays` for `shift`.
/// Any (hospital, weekday, shift) combination not covered by one of a
/// worker's rules is unavailable: the variable builder never materializes
/// a decision for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRule {
    /// Target hospital name.
    pub hospital: String,
    /// Weekdays the worker accepts at this hospital.
    pub weekdays: Vec<Weekday>,
    /// Shift kind the worker accepts at this hospital.
    pub shift: ShiftKind,
}

/// A worker who can be rostered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Stable unique name.
    pub name: String,
    /// Diagnostic-specialist flag; required for university-hospital night
    /// duty on the last day of a holiday run.
    #[serde(default)]
    pub is_specialist: bool,
    /// Availability rules, in declaration order.
    pub assignments: Vec<AssignmentRule>,
}

impl Worker {
    /// Creates a worker with no availability.
    pub fn new(name: impl Into<String>, is_specialist: bool) -> Self {
        Self {
            name: name.into(),
            is_specialist,
            assignments: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_deserializes_without_specialist_flag() {
        let json = r#"{
            "name": "W1",
            "assignments": [
                {"hospital": "H1", "weekdays": ["Fri"], "shift": "night"}
            ]
        }"#;
        let worker: Worker = serde_json::from_str(json).unwrap();
        assert!(!worker.is_specialist);
        assert_eq!(worker.assignments.len(), 1);
        assert_eq!(worker.assignments[0].hospital, "H1");
    }

    #[test]
    fn test_worker_new_has_no_assignments() {
        let worker = Worker::new("W1", true);
        assert!(worker.is_specialist);
        assert!(worker.assignments.is_empty());
    }
}
