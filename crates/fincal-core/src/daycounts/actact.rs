//! Actual/Actual day count conventions.

use super::DayCounter;
use crate::types::{days_in_month, is_leap_year, Date};

/// Actual/Actual (anniversary) day count convention.
///
/// The period is split at the anniversary of the start date carrying the end
/// date's month and day. Whole years between that anniversary and the end
/// count 1.0 each; the stub from the start to the anniversary is divided by
/// 366 if a 29 February falls inside it, 365 otherwise. An anniversary on
/// 29 February in a non-leap year is taken as 28 February.
///
/// # Formula
///
/// $$\text{Year Fraction} = N_{\text{years}} + \frac{\text{Stub Days}}{365 \text{ or } 366}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActAct;

impl DayCounter for ActAct {
    fn name(&self) -> &'static str {
        "ACT/ACT"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        if end < start {
            return -self.year_fraction(end, start);
        }

        let end_before_start_in_year = (start.month(), start.day()) > (end.month(), end.day());
        let (anniversary_year, whole_years) = if end_before_start_in_year {
            (start.year() + 1, end.year() - start.year() - 1)
        } else {
            (start.year(), end.year() - start.year())
        };

        let anniversary = anniversary(start, anniversary_year, end.month(), end.day());
        let basis = if contains_leap_day(start, anniversary) {
            366.0
        } else {
            365.0
        };

        f64::from(whole_years) + start.days_between(&anniversary) as f64 / basis
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// `month`/`day` in `year`, clamped to the month's length.
fn anniversary(start: Date, year: i32, month: u32, day: u32) -> Date {
    let day = day.min(days_in_month(year, month));
    Date::from_ymd(year, month, day).unwrap_or(start)
}

/// Checks if a 29 February falls in `(after, until]`.
fn contains_leap_day(after: Date, until: Date) -> bool {
    (after.year()..=until.year())
        .filter(|year| is_leap_year(*year))
        .filter_map(|year| Date::from_ymd(year, 2, 29).ok())
        .any(|leap_day| after < leap_day && leap_day <= until)
}

/// Actual/Actual ISDA day count convention.
///
/// The period is split at 1 January boundaries; each portion is divided by
/// the length of its own year.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Days in non-leap years}}{365} + \frac{\text{Days in leap years}}{366}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl DayCounter for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        if end < start {
            return -self.year_fraction(end, start);
        }

        if start.year() == end.year() {
            return start.days_between(&end) as f64 / f64::from(end.days_in_year());
        }

        let first_year_end = start.end_of_year().add_days(1);
        let last_year_start = end.start_of_year();

        start.days_between(&first_year_end) as f64 / f64::from(start.days_in_year())
            + f64::from(end.year() - start.year() - 1)
            + last_year_start.days_between(&end) as f64 / f64::from(end.days_in_year())
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
