//! Bitmap holiday storage and rule-based holiday generation.
//!
//! [`HolidayBitmap`] gives O(1) holiday checks over a fixed year window.
//! [`HolidayRules`] expands recurring holiday rules (fixed dates with weekend
//! observance, nth/last weekday, Easter offsets, one-off closures) into the
//! concrete dates of that window.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::types::Date;

/// Maximum days per year (leap year).
const MAX_DAYS_PER_YEAR: usize = 366;

/// Bitmap over a contiguous year window, one bit per day.
///
/// Dates outside the window are never holidays.
#[derive(Clone, PartialEq, Eq)]
pub struct HolidayBitmap {
    first_year: i32,
    last_year: i32,
    bits: Vec<u64>,
}

impl std::fmt::Debug for HolidayBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayBitmap")
            .field("years", &(self.first_year..=self.last_year))
            .field("holiday_count", &self.count())
            .finish()
    }
}

impl HolidayBitmap {
    /// Creates an empty bitmap covering `years`.
    ///
    /// An empty range yields a bitmap that covers nothing.
    pub fn new(years: RangeInclusive<i32>) -> Self {
        let (first_year, last_year) = (*years.start(), *years.end());
        let year_count = if last_year >= first_year {
            (last_year - first_year + 1) as usize
        } else {
            0
        };
        let words = (year_count * MAX_DAYS_PER_YEAR).div_ceil(64);
        Self {
            first_year,
            last_year,
            bits: vec![0u64; words],
        }
    }

    /// Creates a bitmap covering `years` with the given holidays set.
    pub fn from_dates<'a, I>(years: RangeInclusive<i32>, dates: I) -> Self
    where
        I: IntoIterator<Item = &'a Date>,
    {
        let mut bitmap = Self::new(years);
        for date in dates {
            bitmap.insert(*date);
        }
        bitmap
    }

    /// Returns the covered year window.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.first_year..=self.last_year
    }

    /// Marks a date as a holiday. Dates outside the window are ignored.
    pub fn insert(&mut self, date: Date) {
        if let Some((word, bit)) = self.indices(date) {
            self.bits[word] |= 1u64 << bit;
        }
    }

    /// Checks if a date is marked as a holiday.
    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        self.indices(date)
            .is_some_and(|(word, bit)| self.bits[word] & (1u64 << bit) != 0)
    }

    /// Counts marked days.
    pub fn count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    fn indices(&self, date: Date) -> Option<(usize, usize)> {
        let year = date.year();
        if year < self.first_year || year > self.last_year {
            return None;
        }
        let position = (year - self.first_year) as usize * MAX_DAYS_PER_YEAR
            + date.as_naive_date().ordinal0() as usize;
        Some((position / 64, position % 64))
    }
}

/// How a fixed-date holiday falling on a weekend is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Observance {
    /// No substitute day.
    #[default]
    None,
    /// Saturday observed on Friday, Sunday on Monday.
    NearestWeekday,
    /// Sunday observed on Monday; Saturday is not observed.
    SundayToMonday,
    /// Saturday and Sunday both observed on the following Monday.
    NextMonday,
}

impl Observance {
    /// Returns the observed date, if it differs from `date`.
    pub fn observed(self, date: Date) -> Option<Date> {
        match (self, date.weekday()) {
            (Observance::NearestWeekday, Weekday::Sat) => Some(date.add_days(-1)),
            (Observance::NearestWeekday | Observance::SundayToMonday, Weekday::Sun) => {
                Some(date.add_days(1))
            }
            (Observance::NextMonday, Weekday::Sat) => Some(date.add_days(2)),
            (Observance::NextMonday, Weekday::Sun) => Some(date.add_days(1)),
            _ => None,
        }
    }
}

/// Builder expanding holiday rules over a year window.
///
/// Both the actual date and its observed substitute are recorded, so weekend
/// holidays stay visible in the resulting list.
///
/// ```rust
/// use chrono::Weekday;
/// use fincal_core::calendars::{HolidayRules, Observance};
/// use fincal_core::types::Date;
///
/// let holidays = HolidayRules::new(2026..=2026)
///     .fixed(7, 4, Observance::NearestWeekday)
///     .nth_weekday(11, Weekday::Thu, 4)
///     .build();
///
/// assert!(holidays.contains(&Date::from_ymd(2026, 7, 3).unwrap()));
/// assert!(holidays.contains(&Date::from_ymd(2026, 11, 26).unwrap()));
/// ```
#[derive(Debug, Clone)]
pub struct HolidayRules {
    years: RangeInclusive<i32>,
    holidays: Vec<Date>,
}

impl HolidayRules {
    /// Creates an empty rule set for `years`.
    pub fn new(years: RangeInclusive<i32>) -> Self {
        Self {
            years,
            holidays: Vec::new(),
        }
    }

    /// Adds a fixed holiday (same date every year).
    pub fn fixed(self, month: u32, day: u32, observance: Observance) -> Self {
        let from = *self.years.start();
        self.fixed_from(month, day, from, observance)
    }

    /// Adds a fixed holiday observed from `from_year` onwards.
    pub fn fixed_from(mut self, month: u32, day: u32, from_year: i32, observance: Observance) -> Self {
        for year in from_year.max(*self.years.start())..=*self.years.end() {
            if let Ok(date) = Date::from_ymd(year, month, day) {
                self.holidays.push(date);
                self.holidays.extend(observance.observed(date));
            }
        }
        self
    }

    /// Adds the nth occurrence of a weekday in a month.
    pub fn nth_weekday(mut self, month: u32, weekday: Weekday, n: u32) -> Self {
        for year in self.years.clone() {
            self.holidays
                .extend(nth_weekday_of_month(year, month, weekday, n));
        }
        self
    }

    /// Adds the last occurrence of a weekday in a month.
    pub fn last_weekday(mut self, month: u32, weekday: Weekday) -> Self {
        for year in self.years.clone() {
            self.holidays.extend(last_weekday_of_month(year, month, weekday));
        }
        self
    }

    /// Adds a holiday at a day offset from Easter Sunday.
    pub fn easter(mut self, offset_days: i64) -> Self {
        for year in self.years.clone() {
            if let Some(easter) = easter_sunday(year) {
                self.holidays.push(easter.add_days(offset_days));
            }
        }
        self
    }

    /// Adds one-off closures.
    pub fn one_off<I: IntoIterator<Item = (i32, u32, u32)>>(mut self, dates: I) -> Self {
        for (year, month, day) in dates {
            if let Ok(date) = Date::from_ymd(year, month, day) {
                self.holidays.push(date);
            }
        }
        self
    }

    /// Adds holidays produced by a per-year generator.
    pub fn custom<F>(mut self, generator: F) -> Self
    where
        F: Fn(i32) -> Vec<Date>,
    {
        for year in self.years.clone() {
            self.holidays.extend(generator(year));
        }
        self
    }

    /// Returns the sorted, deduplicated holidays inside the year window.
    pub fn build(self) -> Vec<Date> {
        let years = self.years;
        let mut holidays: Vec<Date> = self
            .holidays
            .into_iter()
            .filter(|d| years.contains(&d.year()))
            .collect();
        holidays.sort_unstable();
        holidays.dedup();
        holidays
    }
}

/// Calculates the nth occurrence of a weekday in a month.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<Date> {
    if n == 0 {
        return None;
    }
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let days_until = (weekday.num_days_from_monday() as i32
        - first_of_month.weekday().num_days_from_monday() as i32)
        .rem_euclid(7) as u32;
    let day = 1 + days_until + (n - 1) * 7;

    Date::from_ymd(year, month, day).ok()
}

/// Calculates the last occurrence of a weekday in a month.
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<Date> {
    let last_day = Date::from_ymd(year, month, 1).ok()?.end_of_month();
    let days_back = (last_day.weekday().num_days_from_monday() as i32
        - weekday.num_days_from_monday() as i32)
        .rem_euclid(7);

    Some(last_day.add_days(-i64::from(days_back)))
}

/// Calculates Easter Sunday using the Anonymous Gregorian algorithm.
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> Option<Date> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    Date::from_ymd(year, month as u32, day as u32).ok()
}
