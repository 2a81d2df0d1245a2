//! Preference entries and assignment caps.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::shift::ShiftKind;

/// A worker's stance toward one (date, shift).
///
/// The absence of an entry means [`Preference::Available`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    /// The worker wants this duty; leaving it unassigned is penalized.
    Desired,
    /// The worker accepts this duty (the default).
    Available,
    /// The worker must not be assigned this duty.
    Forbidden,
}

/// One preference row: (worker, date, shift) → preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceEntry {
    /// Worker name.
    pub worker: String,
    /// The date the preference applies to.
    pub date: NaiveDate,
    /// The shift kind the preference applies to.
    pub shift: ShiftKind,
    /// The stance.
    pub preference: Preference,
}

/// One cap row: at most `limit` assignments of `worker` to `hospital` over
/// the month. Workers and hospitals without a row are unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cap {
    /// Worker name.
    pub worker: String,
    /// Hospital name.
    pub hospital: String,
    /// Maximum number of assignments across the month.
    pub limit: u32,
}

/// Folded preference lookup: (worker, date, shift) → preference.
pub type PreferenceMap = BTreeMap<(String, NaiveDate, ShiftKind), Preference>;

/// Folded cap lookup: (worker, hospital) → maximum assignments.
pub type CapMap = BTreeMap<(String, String), u32>;

/// Folds preference rows into a lookup map; later rows win.
pub(crate) fn fold_preferences(entries: &[PreferenceEntry]) -> PreferenceMap {
    entries
        .iter()
        .map(|e| ((e.worker.clone(), e.date, e.shift), e.preference))
        .collect()
}

/// Folds cap rows into a lookup map; later rows win.
pub(crate) fn fold_caps(entries: &[Cap]) -> CapMap {
    entries
        .iter()
        .map(|c| ((c.worker.clone(), c.hospital.clone()), c.limit))
        .collect()
}
