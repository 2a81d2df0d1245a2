//! Hospital model: coverage demand and specified days.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::shift::{Frequency, ShiftKind};

/// A single coverage demand rule on a hospital.
///
/// A rule names a shift kind, the weekdays on which coverage is needed, and
/// a frequency. When the frequency is [`Frequency::Biweekly`] or
/// [`Frequency::SpecificDays`] the rule carries the concrete date set in
/// `dates`; for [`Frequency::Weekly`] the weekday set alone drives the
/// expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandRule {
    /// The shift kind this rule demands.
    pub shift: ShiftKind,
    /// Weekdays on which coverage is needed.
    pub weekdays: Vec<Weekday>,
    /// How often the rule produces coverage points.
    pub frequency: Frequency,
    /// Concrete dates for `Biweekly` and `SpecificDays` rules.
    #[serde(default)]
    pub dates: Vec<NaiveDate>,
}

/// A hospital requesting duty coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    /// Stable unique name.
    pub name: String,
    /// Whether the hospital is a remote site (affects post-night rules).
    pub is_remote: bool,
    /// Whether the hospital is a university hospital (affects specialist
    /// requirements on holiday-run nights).
    pub is_university: bool,
    /// Coverage demand, in declaration order.
    pub demand_rules: Vec<DemandRule>,
}

impl Hospital {
    /// Creates a hospital with no demand rules.
    pub fn new(name: impl Into<String>, is_remote: bool, is_university: bool) -> Self {
        Self {
            name: name.into(),
            is_remote,
            is_university,
            demand_rules: Vec::new(),
        }
    }
}

/// An explicit (hospital, date, shift) coverage requirement.
///
/// A specified day forces demand on that exact date regardless of the
/// hospital's weekly rules, and is never suppressed by holidays. When
/// `treat_as_holiday` is set the hospital additionally treats the date as a
/// holiday while expanding its weekly and biweekly demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecifiedDay {
    /// The hospital the requirement applies to.
    pub hospital: String,
    /// The concrete date.
    pub date: NaiveDate,
    /// The shift kind to staff.
    pub shift: ShiftKind,
    /// Treat this date as a holiday for this hospital's demand expansion.
    #[serde(default)]
    pub treat_as_holiday: bool,
}
