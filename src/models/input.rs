//! The bundled input for one month's optimization.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::hospital::{Hospital, SpecifiedDay};
use super::preference::{fold_caps, fold_preferences, Cap, CapMap, PreferenceEntry, PreferenceMap};
use super::worker::Worker;

/// Everything the engine needs to roster one month.
///
/// `preferences` and `caps` are `Option` so that "the collaborator did not
/// supply this data" is distinguishable from "supplied and empty". Rules
/// that depend on the missing data fail with a configuration error instead
/// of silently treating it as empty.
///
/// `holidays` is the externally provided public-holiday table; it should
/// cover at least the target month plus the first day of the next month so
/// holiday runs ending on the month boundary classify correctly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterInput {
    /// Target year.
    pub year: i32,
    /// Target month (1–12).
    pub month: u32,
    /// Hospitals requesting coverage.
    pub hospitals: Vec<Hospital>,
    /// Workers available for rostering.
    pub workers: Vec<Worker>,
    /// Explicit forced coverage points.
    #[serde(default)]
    pub specified_days: Vec<SpecifiedDay>,
    /// Per-(worker, date, shift) preference rows, if supplied.
    #[serde(default)]
    pub preferences: Option<Vec<PreferenceEntry>>,
    /// Per-(worker, hospital) assignment caps, if supplied.
    #[serde(default)]
    pub caps: Option<Vec<Cap>>,
    /// Public holidays recognized for the target month.
    #[serde(default)]
    pub holidays: BTreeSet<NaiveDate>,
}

impl RosterInput {
    /// Folds the preference rows into a lookup map, if they were supplied.
    pub fn preference_map(&self) -> Option<PreferenceMap> {
        self.preferences.as_deref().map(fold_preferences)
    }

    /// Folds the cap rows into a lookup map, if they were supplied.
    pub fn cap_map(&self) -> Option<CapMap> {
        self.caps.as_deref().map(fold_caps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Preference, ShiftKind};

    #[test]
    fn test_absent_preferences_stay_absent() {
        let input = RosterInput {
            year: 2025,
            month: 10,
            hospitals: vec![],
            workers: vec![],
            specified_days: vec![],
            preferences: None,
            caps: None,
            holidays: BTreeSet::new(),
        };
        assert!(input.preference_map().is_none());
        assert!(input.cap_map().is_none());
    }

    #[test]
    fn test_supplied_empty_preferences_fold_to_empty_map() {
        let input = RosterInput {
            year: 2025,
            month: 10,
            hospitals: vec![],
            workers: vec![],
            specified_days: vec![],
            preferences: Some(vec![]),
            caps: Some(vec![]),
            holidays: BTreeSet::new(),
        };
        assert_eq!(input.preference_map().unwrap().len(), 0);
        assert_eq!(input.cap_map().unwrap().len(), 0);
    }

    #[test]
    fn test_preference_rows_fold() {
        let input = RosterInput {
            year: 2025,
            month: 10,
            hospitals: vec![],
            workers: vec![],
            specified_days: vec![],
            preferences: Some(vec![PreferenceEntry {
                worker: "W1".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 10, 3).unwrap(),
                shift: ShiftKind::Night,
                preference: Preference::Desired,
            }]),
            caps: None,
            holidays: BTreeSet::new(),
        };
        let map = input.preference_map().unwrap();
        assert_eq!(map.len(), 1);
    }
}
