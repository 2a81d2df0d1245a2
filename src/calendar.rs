//! Month calendar and holiday classification.
//!
//! Produces the ordered date list for a target month, classifying each date
//! by weekday, holiday status, and position within holiday runs. A
//! "holiday" is a Saturday, a Sunday, or a date in the externally provided
//! public-holiday table; a "public holiday" is a listed holiday that does
//! not fall on a weekend. The distinction matters because only public
//! holidays suppress non-night coverage demand.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};

/// One date of the target month with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    /// The date.
    pub date: NaiveDate,
    /// Weekday of the date.
    pub weekday: Weekday,
    /// Saturday, Sunday, or a listed public holiday.
    pub is_holiday: bool,
    /// Listed public holiday falling on a weekday; suppresses non-night
    /// demand.
    pub is_public_holiday: bool,
    /// The date is a holiday and the next calendar date is not, i.e. the
    /// last day of a (possibly single-day) holiday run.
    pub is_last_of_holiday_run: bool,
}

/// The ordered calendar for one (year, month).
#[derive(Debug, Clone)]
pub struct MonthCalendar {
    year: i32,
    month: u32,
    days: Vec<CalendarDay>,
    holidays: BTreeSet<NaiveDate>,
}

impl MonthCalendar {
    /// Builds the calendar for `(year, month)` against the given
    /// public-holiday table.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] when the month is outside
    /// 1–12 or the year is not representable.
    pub fn build(year: i32, month: u32, holidays: &BTreeSet<NaiveDate>) -> EngineResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            EngineError::InvalidConfig {
                message: format!("invalid target month {year}-{month:02}"),
            }
        })?;

        let mut days = Vec::with_capacity(31);
        let mut date = first;
        while date.month() == month {
            let is_holiday = holiday(date, holidays);
            let next = date + Duration::days(1);
            days.push(CalendarDay {
                date,
                weekday: date.weekday(),
                is_holiday,
                is_public_holiday: public_holiday(date, holidays),
                is_last_of_holiday_run: is_holiday && !holiday(next, holidays),
            });
            date = next;
        }

        Ok(Self {
            year,
            month,
            days,
            holidays: holidays.clone(),
        })
    }

    /// Target year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Target month.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month's dates in ascending order.
    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    /// Number of dates in the month.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always false for a valid month; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Looks up a date of the month.
    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        if date.year() != self.year || date.month() != self.month {
            return None;
        }
        self.days.get(date.day0() as usize)
    }

    /// Whether `date` belongs to the target month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.day(date).is_some()
    }

    /// Weekend-or-listed-holiday classification, valid for any date.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        holiday(date, &self.holidays)
    }

    /// Listed holiday on a weekday, valid for any date.
    pub fn is_public_holiday(&self, date: NaiveDate) -> bool {
        public_holiday(date, &self.holidays)
    }
}

fn weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn holiday(date: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> bool {
    weekend(date) || holidays.contains(&date)
}

fn public_holiday(date: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> bool {
    holidays.contains(&date) && !weekend(date)
}
