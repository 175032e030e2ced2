//! Business/252 day count convention.

use super::DayCounter;
use crate::calendars::BusinessCalendar;
use crate::types::Date;

/// Business/252 day count convention.
///
/// Counts business days in `[start, end)` on the bound calendar over a
/// 252-day year. Used for Brazilian fixed income.
#[derive(Debug, Clone, Copy)]
pub struct Business252<'a> {
    calendar: &'a BusinessCalendar,
}

impl<'a> Business252<'a> {
    /// Binds the convention to a calendar.
    #[must_use]
    pub fn new(calendar: &'a BusinessCalendar) -> Self {
        Self { calendar }
    }

    /// Returns the calendar.
    #[must_use]
    pub fn calendar(&self) -> &'a BusinessCalendar {
        self.calendar
    }
}

impl DayCounter for Business252<'_> {
    fn name(&self) -> &'static str {
        "BUS/252"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 252.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        self.calendar.business_days_between(start, end)
    }
}
