//! Expansion of hospital demand into the required coverage set.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::calendar::MonthCalendar;
use crate::models::{Frequency, Hospital, ShiftKind, SpecifiedDay};

use super::variables::CoveragePoint;

/// Expands every hospital's demand rules against the month and merges the
/// specified days into the set of coverage points that must be staffed.
///
/// Frequency semantics:
/// - `Weekly` produces a point for every month date whose weekday is in the
///   rule's weekday set.
/// - `Biweekly` and `SpecificDays` produce points for the rule's explicit
///   date enumeration (restricted to dates of the month).
///
/// Non-night `Weekly`/`Biweekly` points are suppressed on public holidays,
/// and on dates a [`SpecifiedDay`] marks `treat_as_holiday` for the
/// hospital. Night demand and explicit dates are never suppressed.
/// Duplicate producers of the same point collapse into one.
pub fn expand_required_coverage(
    hospitals: &[Hospital],
    calendar: &MonthCalendar,
    specified_days: &[SpecifiedDay],
) -> BTreeSet<CoveragePoint> {
    let mut holiday_overrides: BTreeMap<&str, BTreeSet<NaiveDate>> = BTreeMap::new();
    for sd in specified_days {
        if sd.treat_as_holiday {
            holiday_overrides
                .entry(sd.hospital.as_str())
                .or_default()
                .insert(sd.date);
        }
    }

    let mut required = BTreeSet::new();

    for hospital in hospitals {
        let overrides = holiday_overrides.get(hospital.name.as_str());
        let suppressed = |date: NaiveDate| {
            calendar.is_public_holiday(date)
                || overrides.is_some_and(|dates| dates.contains(&date))
        };

        for rule in &hospital.demand_rules {
            match rule.frequency {
                Frequency::Weekly => {
                    for day in calendar.days() {
                        if !rule.weekdays.contains(&day.weekday) {
                            continue;
                        }
                        if rule.shift != ShiftKind::Night && suppressed(day.date) {
                            continue;
                        }
                        required.insert(CoveragePoint {
                            hospital: hospital.name.clone(),
                            date: day.date,
                            shift: rule.shift,
                        });
                    }
                }
                Frequency::Biweekly => {
                    for &date in &rule.dates {
                        if !calendar.contains(date) {
                            continue;
                        }
                        if rule.shift != ShiftKind::Night && suppressed(date) {
                            continue;
                        }
                        required.insert(CoveragePoint {
                            hospital: hospital.name.clone(),
                            date,
                            shift: rule.shift,
                        });
                    }
                }
                Frequency::SpecificDays => {
                    for &date in &rule.dates {
                        if calendar.contains(date) {
                            required.insert(CoveragePoint {
                                hospital: hospital.name.clone(),
                                date,
                                shift: rule.shift,
                            });
                        }
                    }
                }
            }
        }
    }

    for sd in specified_days {
        if calendar.contains(sd.date) {
            required.insert(CoveragePoint {
                hospital: sd.hospital.clone(),
                date: sd.date,
                shift: sd.shift,
            });
        }
    }

    required
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DemandRule;
    use chrono::Weekday;

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn october_2025() -> MonthCalendar {
        let holidays = BTreeSet::from([make_date("2025-10-13")]);
        MonthCalendar::build(2025, 10, &holidays).unwrap()
    }

    fn hospital_with(rules: Vec<DemandRule>) -> Hospital {
        Hospital {
            name: "H1".to_string(),
            is_remote: false,
            is_university: false,
            demand_rules: rules,
        }
    }

    #[test]
    fn test_weekly_night_expands_to_all_fridays() {
        let calendar = october_2025();
        let hospital = hospital_with(vec![DemandRule {
            shift: ShiftKind::Night,
            weekdays: vec![Weekday::Fri],
            frequency: Frequency::Weekly,
            dates: vec![],
        }]);
        let required = expand_required_coverage(&[hospital], &calendar, &[]);
        let dates: Vec<NaiveDate> = required.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![
                make_date("2025-10-03"),
                make_date("2025-10-10"),
                make_date("2025-10-17"),
                make_date("2025-10-24"),
                make_date("2025-10-31"),
            ]
        );
    }

    #[test]
    fn test_non_night_suppressed_on_public_holiday() {
        // 2025-10-13 (Mon) is a listed holiday: Monday day duty skips it.
        let calendar = october_2025();
        let hospital = hospital_with(vec![DemandRule {
            shift: ShiftKind::Day,
            weekdays: vec![Weekday::Mon],
            frequency: Frequency::Weekly,
            dates: vec![],
        }]);
        let required = expand_required_coverage(&[hospital], &calendar, &[]);
        assert!(!required
            .iter()
            .any(|p| p.date == make_date("2025-10-13")));
        assert!(required.iter().any(|p| p.date == make_date("2025-10-06")));
    }

    #[test]
    fn test_night_not_suppressed_on_public_holiday() {
        let calendar = october_2025();
        let hospital = hospital_with(vec![DemandRule {
            shift: ShiftKind::Night,
            weekdays: vec![Weekday::Mon],
            frequency: Frequency::Weekly,
            dates: vec![],
        }]);
        let required = expand_required_coverage(&[hospital], &calendar, &[]);
        assert!(required.iter().any(|p| p.date == make_date("2025-10-13")));
    }

    #[test]
    fn test_am_suppressed_like_day() {
        let calendar = october_2025();
        let hospital = hospital_with(vec![DemandRule {
            shift: ShiftKind::Am,
            weekdays: vec![Weekday::Mon],
            frequency: Frequency::Weekly,
            dates: vec![],
        }]);
        let required = expand_required_coverage(&[hospital], &calendar, &[]);
        assert!(!required
            .iter()
            .any(|p| p.date == make_date("2025-10-13")));
    }

    #[test]
    fn test_specified_day_reenables_suppressed_point() {
        let calendar = october_2025();
        let hospital = hospital_with(vec![DemandRule {
            shift: ShiftKind::Day,
            weekdays: vec![Weekday::Mon],
            frequency: Frequency::Weekly,
            dates: vec![],
        }]);
        let specified = vec![SpecifiedDay {
            hospital: "H1".to_string(),
            date: make_date("2025-10-13"),
            shift: ShiftKind::Day,
            treat_as_holiday: false,
        }];
        let required = expand_required_coverage(&[hospital], &calendar, &specified);
        assert!(required.iter().any(|p| p.date == make_date("2025-10-13")));
    }

    #[test]
    fn test_specific_days_ignore_holiday_suppression() {
        let calendar = october_2025();
        let hospital = hospital_with(vec![DemandRule {
            shift: ShiftKind::Day,
            weekdays: vec![],
            frequency: Frequency::SpecificDays,
            dates: vec![make_date("2025-10-13")],
        }]);
        let required = expand_required_coverage(&[hospital], &calendar, &[]);
        assert_eq!(required.len(), 1);
    }

    #[test]
    fn test_biweekly_uses_explicit_dates() {
        let calendar = october_2025();
        let hospital = hospital_with(vec![DemandRule {
            shift: ShiftKind::Night,
            weekdays: vec![Weekday::Fri],
            frequency: Frequency::Biweekly,
            dates: vec![make_date("2025-10-03"), make_date("2025-10-17")],
        }]);
        let required = expand_required_coverage(&[hospital], &calendar, &[]);
        assert_eq!(required.len(), 2);
    }

    #[test]
    fn test_treat_as_holiday_suppresses_weekly_demand_for_that_hospital() {
        let calendar = MonthCalendar::build(2025, 10, &BTreeSet::new()).unwrap();
        let hospital = hospital_with(vec![DemandRule {
            shift: ShiftKind::Day,
            weekdays: vec![Weekday::Wed],
            frequency: Frequency::Weekly,
            dates: vec![],
        }]);
        // Close Wednesday 10-08 for this hospital, staffing a night instead.
        let specified = vec![SpecifiedDay {
            hospital: "H1".to_string(),
            date: make_date("2025-10-08"),
            shift: ShiftKind::Night,
            treat_as_holiday: true,
        }];
        let required = expand_required_coverage(&[hospital], &calendar, &specified);
        assert!(!required.contains(&CoveragePoint {
            hospital: "H1".to_string(),
            date: make_date("2025-10-08"),
            shift: ShiftKind::Day,
        }));
        assert!(required.contains(&CoveragePoint {
            hospital: "H1".to_string(),
            date: make_date("2025-10-08"),
            shift: ShiftKind::Night,
        }));
    }

    #[test]
    fn test_duplicate_producers_collapse() {
        let calendar = october_2025();
        let hospital = hospital_with(vec![
            DemandRule {
                shift: ShiftKind::Night,
                weekdays: vec![Weekday::Fri],
                frequency: Frequency::Weekly,
                dates: vec![],
            },
            DemandRule {
                shift: ShiftKind::Night,
                weekdays: vec![],
                frequency: Frequency::SpecificDays,
                dates: vec![make_date("2025-10-03")],
            },
        ]);
        let required = expand_required_coverage(&[hospital], &calendar, &[]);
        assert_eq!(required.len(), 5);
    }

    #[test]
    fn test_out_of_month_dates_ignored() {
        let calendar = october_2025();
        let hospital = hospital_with(vec![DemandRule {
            shift: ShiftKind::Night,
            weekdays: vec![],
            frequency: Frequency::SpecificDays,
            dates: vec![make_date("2025-11-03")],
        }]);
        let required = expand_required_coverage(&[hospital], &calendar, &[]);
        assert!(required.is_empty());
    }
}
