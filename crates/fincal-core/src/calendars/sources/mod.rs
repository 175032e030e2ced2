//! Holiday sources.
//!
//! A [`HolidaySource`] turns a country (or exchange) code, an optional
//! subdivision and a year window into the holiday dates of that calendar.
//! The registry asks its source once per identifier and caches the result.

mod japan;
mod rules;
mod target2;
mod uk;
mod us;

use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub use rules::RuleHolidaySource;

use crate::error::{FincalError, FincalResult};
use crate::types::Date;

/// Provider of holiday dates for calendar codes.
///
/// Implemented by [`RuleHolidaySource`], [`StaticHolidaySource`] and any
/// closure `Fn(&str, Option<&str>, RangeInclusive<i32>) -> FincalResult<Vec<Date>>`.
pub trait HolidaySource: Send + Sync {
    /// Returns the holidays of `country` (optionally `subdivision`) within
    /// `years`, in any order.
    ///
    /// # Errors
    ///
    /// Returns `FincalError::InvalidCalendar` for unknown codes.
    fn holidays(
        &self,
        country: &str,
        subdivision: Option<&str>,
        years: RangeInclusive<i32>,
    ) -> FincalResult<Vec<Date>>;
}

impl<F> HolidaySource for F
where
    F: Fn(&str, Option<&str>, RangeInclusive<i32>) -> FincalResult<Vec<Date>> + Send + Sync,
{
    fn holidays(
        &self,
        country: &str,
        subdivision: Option<&str>,
        years: RangeInclusive<i32>,
    ) -> FincalResult<Vec<Date>> {
        self(country, subdivision, years)
    }
}

/// On-disk layout of a static holiday file.
#[derive(Debug, Serialize, Deserialize)]
struct StaticCalendarFile {
    calendars: Vec<StaticCalendarEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StaticCalendarEntry {
    code: String,
    holidays: Vec<Date>,
}

/// Holiday source backed by explicit date lists.
///
/// Intended for markets without rules (e.g. `CN`, `HK`). Lists are keyed by
/// the upper-cased code, `COUNTRY` or `COUNTRY:SUBDIVISION`. Codes without a
/// list are delegated to the fallback source, if any.
///
/// ```rust
/// use fincal_core::calendars::{HolidaySource, StaticHolidaySource};
///
/// let json = r#"{"calendars": [{"code": "HK", "holidays": ["2025-01-29", "2025-01-30"]}]}"#;
/// let source = StaticHolidaySource::from_json(json).unwrap();
/// let hols = source.holidays("HK", None, 2025..=2025).unwrap();
/// assert_eq!(hols.len(), 2);
/// ```
#[derive(Default)]
pub struct StaticHolidaySource {
    calendars: HashMap<String, Vec<Date>>,
    fallback: Option<Box<dyn HolidaySource>>,
}

impl fmt::Debug for StaticHolidaySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticHolidaySource")
            .field("codes", &self.codes())
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}

impl StaticHolidaySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON document of the form
    /// `{"calendars": [{"code": "HK", "holidays": ["2025-01-29", ...]}]}`.
    ///
    /// Repeated codes are merged.
    pub fn from_json(json: &str) -> FincalResult<Self> {
        let file: StaticCalendarFile = serde_json::from_str(json)
            .map_err(|e| FincalError::config(format!("invalid holiday file: {e}")))?;

        let mut source = Self::new();
        for entry in file.calendars {
            source.insert(&entry.code, entry.holidays);
        }
        Ok(source)
    }

    /// Adds a calendar's holidays, returning the updated source.
    pub fn with_calendar<I: IntoIterator<Item = Date>>(mut self, code: &str, holidays: I) -> Self {
        self.insert(code, holidays);
        self
    }

    /// Sets the source consulted for codes without a static list.
    pub fn with_fallback<S: HolidaySource + 'static>(mut self, fallback: S) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    /// Adds holidays to a calendar, creating it if needed.
    pub fn insert<I: IntoIterator<Item = Date>>(&mut self, code: &str, holidays: I) {
        let list = self
            .calendars
            .entry(code.trim().to_ascii_uppercase())
            .or_default();
        list.extend(holidays);
        list.sort_unstable();
        list.dedup();
    }

    /// Returns the codes with a static list, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.calendars.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

impl HolidaySource for StaticHolidaySource {
    fn holidays(
        &self,
        country: &str,
        subdivision: Option<&str>,
        years: RangeInclusive<i32>,
    ) -> FincalResult<Vec<Date>> {
        let key = match subdivision {
            Some(sub) => format!("{country}:{sub}"),
            None => country.to_string(),
        }
        .to_ascii_uppercase();

        match (self.calendars.get(&key), &self.fallback) {
            (Some(list), _) => Ok(list
                .iter()
                .copied()
                .filter(|d| years.contains(&d.year()))
                .collect()),
            (None, Some(fallback)) => fallback.holidays(country, subdivision, years),
            (None, None) => Err(FincalError::invalid_calendar(
                key,
                "no static holiday list for this code",
            )),
        }
    }
}
