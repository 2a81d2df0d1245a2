//! Shift kinds and demand frequencies.

use serde::{Deserialize, Serialize};

/// The kind of a duty shift.
///
/// `Day` spans the whole working day, `Am` and `Pm` are half days, and
/// `Night` is an overnight duty. `Day` overlaps in time with both `Am` and
/// `Pm`, while `Am` and `Pm` do not overlap each other; the overlap rules
/// rely on exactly this structure.
///
/// # Example
///
/// ```
/// use roster_engine::models::ShiftKind;
///
/// assert_eq!(ShiftKind::Night.to_string(), "night");
/// assert!(ShiftKind::Day.overlaps(ShiftKind::Am));
/// assert!(!ShiftKind::Am.overlaps(ShiftKind::Pm));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    /// Full working day.
    Day,
    /// Overnight duty.
    Night,
    /// Morning half day.
    Am,
    /// Afternoon half day.
    Pm,
}

impl ShiftKind {
    /// All shift kinds, in the canonical order used for iteration.
    pub const ALL: [ShiftKind; 4] = [
        ShiftKind::Day,
        ShiftKind::Night,
        ShiftKind::Am,
        ShiftKind::Pm,
    ];

    /// Returns true when two shift kinds occupy overlapping time on the
    /// same date. Every kind overlaps itself; `Day` additionally overlaps
    /// `Am` and `Pm`.
    pub fn overlaps(self, other: ShiftKind) -> bool {
        if self == other {
            return true;
        }
        matches!(
            (self, other),
            (ShiftKind::Day, ShiftKind::Am)
                | (ShiftKind::Am, ShiftKind::Day)
                | (ShiftKind::Day, ShiftKind::Pm)
                | (ShiftKind::Pm, ShiftKind::Day)
        )
    }

    /// Short lowercase token used in solver variable names.
    pub fn token(self) -> &'static str {
        match self {
            ShiftKind::Day => "day",
            ShiftKind::Night => "night",
            ShiftKind::Am => "am",
            ShiftKind::Pm => "pm",
        }
    }
}

impl std::fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// How often a hospital demand rule produces coverage points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Every matching weekday of the month.
    Weekly,
    /// Every other week; the concrete dates are enumerated on the rule.
    Biweekly,
    /// Only the dates enumerated on the rule.
    SpecificDays,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_overlaps_half_days() {
        assert!(ShiftKind::Day.overlaps(ShiftKind::Am));
        assert!(ShiftKind::Day.overlaps(ShiftKind::Pm));
        assert!(ShiftKind::Am.overlaps(ShiftKind::Day));
        assert!(ShiftKind::Pm.overlaps(ShiftKind::Day));
    }

    #[test]
    fn test_half_days_do_not_overlap_each_other() {
        assert!(!ShiftKind::Am.overlaps(ShiftKind::Pm));
        assert!(!ShiftKind::Pm.overlaps(ShiftKind::Am));
    }

    #[test]
    fn test_night_overlaps_only_itself() {
        assert!(ShiftKind::Night.overlaps(ShiftKind::Night));
        assert!(!ShiftKind::Night.overlaps(ShiftKind::Day));
        assert!(!ShiftKind::Night.overlaps(ShiftKind::Am));
        assert!(!ShiftKind::Night.overlaps(ShiftKind::Pm));
    }

    #[test]
    fn test_shift_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ShiftKind::Night).unwrap(),
            "\"night\""
        );
        let parsed: ShiftKind = serde_json::from_str("\"am\"").unwrap();
        assert_eq!(parsed, ShiftKind::Am);
    }

    #[test]
    fn test_frequency_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Frequency::SpecificDays).unwrap(),
            "\"specific_days\""
        );
    }
}
