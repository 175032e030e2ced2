//! Resolved business-day calendar.

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::{Arc, OnceLock};

use super::bitmap::HolidayBitmap;
use crate::error::{FincalError, FincalResult};
use crate::types::Date;

/// Identifier of the weekends-only calendar.
pub const WEEKENDS_ONLY: &str = "WEEKENDS";

static WEEKENDS_ONLY_CALENDAR: OnceLock<Arc<BusinessCalendar>> = OnceLock::new();

/// An immutable holiday set with Saturday/Sunday weekends.
///
/// Holds the sorted holiday list and a bitmap over the holiday year window.
/// Dates outside the window are never holidays.
///
/// # Performance
///
/// - `is_business_day()`: O(1)
/// - `business_days_between()`: O(log n) in the number of holidays
#[derive(Clone)]
pub struct BusinessCalendar {
    id: String,
    holidays: Vec<Date>,
    /// Holidays falling Monday to Friday, for counting.
    weekday_holidays: Vec<Date>,
    bitmap: HolidayBitmap,
}

impl fmt::Debug for BusinessCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BusinessCalendar")
            .field("id", &self.id)
            .field("years", &self.bitmap.years())
            .field("holiday_count", &self.holidays.len())
            .finish()
    }
}

impl PartialEq for BusinessCalendar {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.holidays == other.holidays
    }
}

impl BusinessCalendar {
    /// Creates a calendar from holidays within `years`.
    ///
    /// Holidays are sorted and deduplicated; dates outside `years` are dropped.
    pub fn new(id: impl Into<String>, years: RangeInclusive<i32>, holidays: Vec<Date>) -> Self {
        let mut holidays: Vec<Date> = holidays
            .into_iter()
            .filter(|d| years.contains(&d.year()))
            .collect();
        holidays.sort_unstable();
        holidays.dedup();

        let weekday_holidays = holidays.iter().copied().filter(Date::is_weekday).collect();
        let bitmap = HolidayBitmap::from_dates(years, &holidays);

        Self {
            id: id.into(),
            holidays,
            weekday_holidays,
            bitmap,
        }
    }

    /// Returns the shared calendar with weekends only and no holidays.
    pub fn weekends_only() -> Arc<BusinessCalendar> {
        Arc::clone(Self::weekends_only_ref_arc())
    }

    /// Weekends-only calendar by reference.
    pub(crate) fn weekends_only_ref() -> &'static BusinessCalendar {
        Self::weekends_only_ref_arc()
    }

    #[allow(clippy::reversed_empty_ranges)]
    fn weekends_only_ref_arc() -> &'static Arc<BusinessCalendar> {
        WEEKENDS_ONLY_CALENDAR
            .get_or_init(|| Arc::new(BusinessCalendar::new(WEEKENDS_ONLY, 1..=0, Vec::new())))
    }

    /// Union of several calendars: a day is a holiday if it is a holiday in
    /// any of them. The year window spans all the parts' windows.
    pub fn union(id: impl Into<String>, parts: &[Arc<BusinessCalendar>]) -> Self {
        let start = parts.iter().map(|c| *c.years().start()).min().unwrap_or(1);
        let end = parts.iter().map(|c| *c.years().end()).max().unwrap_or(0);
        let holidays = parts
            .iter()
            .flat_map(|c| c.holidays.iter().copied())
            .collect();
        Self::new(id, start..=end, holidays)
    }

    /// Returns the calendar identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the holiday year window.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.bitmap.years()
    }

    /// Returns the sorted holidays, including those falling on weekends.
    pub fn holidays(&self) -> &[Date] {
        &self.holidays
    }

    /// Checks if a date is in the holiday set.
    #[inline]
    pub fn is_holiday(&self, date: Date) -> bool {
        self.bitmap.contains(date)
    }

    /// Checks if a date is a business day: neither weekend nor holiday.
    #[inline]
    pub fn is_business_day(&self, date: Date) -> bool {
        date.is_weekday() && !self.bitmap.contains(date)
    }

    /// Returns the first business day on or after `date`.
    pub fn next_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1);
        }
        result
    }

    /// Returns the last business day on or before `date`.
    pub fn previous_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(-1);
        }
        result
    }

    /// Moves `days` business days from `date`.
    ///
    /// The first business day strictly after (or before, for negative
    /// `days`) `date` counts as one. Zero returns `date` unchanged.
    ///
    /// # Errors
    ///
    /// Returns `FincalError::InvalidDate` if the walk leaves the supported
    /// date range.
    pub fn add_business_days(&self, date: Date, days: i32) -> FincalResult<Date> {
        let direction: i64 = if days >= 0 { 1 } else { -1 };
        // The target is at least `days` calendar days away
        date.checked_add_days(i64::from(days)).map_err(|_| {
            FincalError::invalid_date(format!("{date} + {days} business days is out of range"))
        })?;

        let mut remaining = days.unsigned_abs();
        let mut result = date;
        while remaining > 0 {
            result = result.checked_add_days(direction)?;
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }
        Ok(result)
    }

    /// Counts business days in `[start, end)`.
    ///
    /// Negative when `end < start`.
    pub fn business_days_between(&self, start: Date, end: Date) -> i64 {
        if end < start {
            return -self.business_days_between(end, start);
        }
        let holidays = self.weekday_holidays.partition_point(|h| *h < end)
            - self.weekday_holidays.partition_point(|h| *h < start);
        weekdays_between(start, end) - holidays as i64
    }

    /// Returns every business day in `[start, end]`.
    pub fn business_days(&self, start: Date, end: Date) -> Vec<Date> {
        let mut days = Vec::new();
        let mut current = self.next_business_day(start);
        while current <= end {
            days.push(current);
            current = self.next_business_day(current.add_days(1));
        }
        days
    }
}

/// Counts Monday-Friday days in `[start, end)`, `start <= end`.
fn weekdays_between(start: Date, end: Date) -> i64 {
    let days = end - start;
    let full_weeks = days / 7;
    let mut count = full_weeks * 5;

    let mut current = start.add_days(full_weeks * 7);
    while current < end {
        if current.is_weekday() {
            count += 1;
        }
        current = current.add_days(1);
    }
    count
}
