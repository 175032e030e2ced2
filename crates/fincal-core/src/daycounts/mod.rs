//! Day count conventions for accrual calculations.
//!
//! Day count conventions determine how accrual fractions are calculated
//! by specifying how to count days between two dates and the year basis.
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360 - Money market convention
//! - [`Act365`]: Actual/365 Fixed
//! - [`ActAct`]: Actual/Actual, anniversary based
//! - [`ActActIsda`]: Actual/Actual ISDA - Year-based split
//! - [`Thirty360`]: 30/360 Bond Basis
//! - [`Thirty360E`]: 30E/360 Eurobond Basis
//! - [`Business252`]: Business/252, requires a calendar
//!
//! # Usage
//!
//! ```rust
//! use fincal_core::daycounts::DayCount;
//! use fincal_core::types::Date;
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//!
//! let dcf = DayCount::Act360.dcf(start, end, None).unwrap();
//! assert!((dcf - 182.0 / 360.0).abs() < 1e-15);
//! ```

mod act;
mod actact;
mod business252;
mod thirty360;

pub use act::{Act360, Act365};
pub use actact::{ActAct, ActActIsda};
pub use business252::Business252;
pub use thirty360::{Thirty360, Thirty360E};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calendars::BusinessCalendar;
use crate::error::{FincalError, FincalResult};
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations provide the year fraction calculation between two dates
/// according to specific market conventions.
///
/// # Implementation Notes
///
/// - `year_fraction` is negative when `end < start` and zero for equal dates
/// - `day_count` returns the numerator of the fraction
/// - Implementations must be thread-safe (`Send + Sync`)
pub trait DayCounter: Send + Sync {
    /// Returns the name of the day count convention (e.g., "ACT/360").
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Calculates the day count between two dates.
    ///
    /// For ACT conventions, this is actual calendar days.
    /// For 30/360 conventions, this uses the 30-day month assumption.
    /// For Business/252, this is business days on the calendar.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of all supported day count conventions.
///
/// The closed set of conventions selectable at runtime. Serialized with the
/// compact tags (`ACT360`, `30E360`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCount {
    // =========================================================================
    // ACT Family
    // =========================================================================
    /// Actual/360
    #[serde(rename = "ACT360")]
    Act360,

    /// Actual/365 Fixed
    #[serde(rename = "ACT365")]
    Act365,

    /// Actual/Actual, anniversary based
    #[serde(rename = "ACTACT")]
    ActAct,

    /// Actual/Actual ISDA
    #[serde(rename = "ACTACTISDA")]
    ActActIsda,

    // =========================================================================
    // 30/360 Family
    // =========================================================================
    /// 30/360 Bond Basis
    #[serde(rename = "30360")]
    Thirty360,

    /// 30E/360 Eurobond Basis
    #[serde(rename = "30E360")]
    Thirty360E,

    // =========================================================================
    // Business day based
    // =========================================================================
    /// Business/252
    #[serde(rename = "BD252")]
    Business252,
}

impl DayCount {
    /// Calculates the day count fraction between two dates.
    ///
    /// `calendar` is only consulted by [`DayCount::Business252`].
    ///
    /// # Errors
    ///
    /// Returns `FincalError::UnsupportedConvention` for Business/252 without
    /// a calendar.
    pub fn dcf(
        self,
        from: Date,
        to: Date,
        calendar: Option<&BusinessCalendar>,
    ) -> FincalResult<f64> {
        Ok(match self {
            DayCount::Act360 => Act360.year_fraction(from, to),
            DayCount::Act365 => Act365.year_fraction(from, to),
            DayCount::ActAct => ActAct.year_fraction(from, to),
            DayCount::ActActIsda => ActActIsda.year_fraction(from, to),
            DayCount::Thirty360 => Thirty360.year_fraction(from, to),
            DayCount::Thirty360E => Thirty360E.year_fraction(from, to),
            DayCount::Business252 => {
                Business252::new(self.require_calendar(calendar)?).year_fraction(from, to)
            }
        })
    }

    /// Calculates the day count numerator between two dates.
    ///
    /// # Errors
    ///
    /// Returns `FincalError::UnsupportedConvention` for Business/252 without
    /// a calendar.
    pub fn day_count(
        self,
        from: Date,
        to: Date,
        calendar: Option<&BusinessCalendar>,
    ) -> FincalResult<i64> {
        Ok(match self {
            DayCount::Act360 => Act360.day_count(from, to),
            DayCount::Act365 => Act365.day_count(from, to),
            DayCount::ActAct => ActAct.day_count(from, to),
            DayCount::ActActIsda => ActActIsda.day_count(from, to),
            DayCount::Thirty360 => Thirty360.day_count(from, to),
            DayCount::Thirty360E => Thirty360E.day_count(from, to),
            DayCount::Business252 => {
                Business252::new(self.require_calendar(calendar)?).day_count(from, to)
            }
        })
    }

    /// Returns the fraction represented by `days` (default 1) days.
    ///
    /// # Errors
    ///
    /// Returns `FincalError::UnsupportedConvention` for the Actual/Actual
    /// conventions, whose basis depends on the dates.
    pub fn unit_dcf(self, days: Option<u32>) -> FincalResult<f64> {
        let basis = match self {
            DayCount::Act360 | DayCount::Thirty360 | DayCount::Thirty360E => 360.0,
            DayCount::Act365 => 365.0,
            DayCount::Business252 => 252.0,
            DayCount::ActAct | DayCount::ActActIsda => {
                return Err(FincalError::unsupported(self.tag(), "unit fraction"));
            }
        };
        Ok(f64::from(days.unwrap_or(1)) / basis)
    }

    /// Checks if the convention needs a calendar.
    #[must_use]
    pub fn requires_calendar(self) -> bool {
        self == DayCount::Business252
    }

    fn require_calendar(self, calendar: Option<&BusinessCalendar>) -> FincalResult<&BusinessCalendar> {
        calendar.ok_or_else(|| FincalError::unsupported(self.tag(), "day count without a calendar"))
    }

    /// Returns the display name (e.g., "ACT/360", "30E/360").
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DayCount::Act360 => "ACT/360",
            DayCount::Act365 => "ACT/365",
            DayCount::ActAct => "ACT/ACT",
            DayCount::ActActIsda => "ACT/ACT ISDA",
            DayCount::Thirty360 => "30/360",
            DayCount::Thirty360E => "30E/360",
            DayCount::Business252 => "BUS/252",
        }
    }

    /// Returns the compact tag (e.g., "ACT360", "30E360").
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            DayCount::Act360 => "ACT360",
            DayCount::Act365 => "ACT365",
            DayCount::ActAct => "ACTACT",
            DayCount::ActActIsda => "ACTACTISDA",
            DayCount::Thirty360 => "30360",
            DayCount::Thirty360E => "30E360",
            DayCount::Business252 => "BD252",
        }
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCount] {
        &[
            DayCount::Act360,
            DayCount::Act365,
            DayCount::ActAct,
            DayCount::ActActIsda,
            DayCount::Thirty360,
            DayCount::Thirty360E,
            DayCount::Business252,
        ]
    }
}

impl fmt::Display for DayCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DayCount {
    type Err = FincalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && !matches!(c, '/' | '_' | '-'))
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "ACT360" | "A360" => Ok(DayCount::Act360),
            "ACT365" | "ACT365F" | "ACT365FIXED" | "A365" => Ok(DayCount::Act365),
            "ACTACT" => Ok(DayCount::ActAct),
            "ACTACTISDA" => Ok(DayCount::ActActIsda),
            "30360" | "BOND" => Ok(DayCount::Thirty360),
            "30E360" | "EUROBOND" => Ok(DayCount::Thirty360E),
            "BD252" | "BUS252" => Ok(DayCount::Business252),
            _ => Err(FincalError::unsupported(s, "day count")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_all_conventions_same_day_zero() {
        let calendar = BusinessCalendar::weekends_only();
        let date = d(2025, 6, 16);
        for dc in DayCount::all() {
            assert_eq!(dc.dcf(date, date, Some(&*calendar)).unwrap(), 0.0, "{dc}");
        }
    }

    #[test]
    fn test_dcf_reversed_negates() {
        let calendar = BusinessCalendar::weekends_only();
        let (a, b) = (d(2023, 11, 17), d(2025, 2, 3));
        for dc in DayCount::all() {
            let forward = dc.dcf(a, b, Some(&*calendar)).unwrap();
            let backward = dc.dcf(b, a, Some(&*calendar)).unwrap();
            assert_relative_eq!(forward, -backward, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_act360_dcf() {
        assert_relative_eq!(
            DayCount::Act360.dcf(d(2024, 1, 1), d(2024, 7, 1), None).unwrap(),
            182.0 / 360.0
        );
    }

    #[test]
    fn test_business252_requires_calendar() {
        let err = DayCount::Business252
            .dcf(d(2025, 1, 6), d(2025, 1, 13), None)
            .unwrap_err();
        assert!(matches!(err, FincalError::UnsupportedConvention { ref convention, .. } if convention == "BD252"));
        assert!(DayCount::Business252.requires_calendar());
        assert!(!DayCount::Act360.requires_calendar());
    }

    #[test]
    fn test_day_count() {
        assert_eq!(
            DayCount::Thirty360.day_count(d(2025, 1, 31), d(2025, 3, 31), None).unwrap(),
            60
        );
        assert_eq!(
            DayCount::Act365.day_count(d(2025, 1, 31), d(2025, 3, 31), None).unwrap(),
            59
        );
    }

    #[test]
    fn test_unit_dcf() {
        assert_relative_eq!(DayCount::Act360.unit_dcf(None).unwrap(), 1.0 / 360.0);
        assert_relative_eq!(DayCount::Thirty360E.unit_dcf(Some(90)).unwrap(), 0.25);
        assert_relative_eq!(DayCount::Act365.unit_dcf(Some(73)).unwrap(), 0.2);
        assert_relative_eq!(DayCount::Business252.unit_dcf(Some(252)).unwrap(), 1.0);
        assert!(matches!(
            DayCount::ActAct.unit_dcf(None),
            Err(FincalError::UnsupportedConvention { .. })
        ));
        assert!(DayCount::ActActIsda.unit_dcf(Some(10)).is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("ACT360".parse::<DayCount>().unwrap(), DayCount::Act360);
        assert_eq!("ACT/360".parse::<DayCount>().unwrap(), DayCount::Act360);
        assert_eq!("act/act isda".parse::<DayCount>().unwrap(), DayCount::ActActIsda);
        assert_eq!("30/360".parse::<DayCount>().unwrap(), DayCount::Thirty360);
        assert_eq!("30E/360".parse::<DayCount>().unwrap(), DayCount::Thirty360E);
        assert_eq!("BUS/252".parse::<DayCount>().unwrap(), DayCount::Business252);

        let err = "ACT/364".parse::<DayCount>().unwrap_err();
        assert!(err.to_string().contains("ACT/364"));

        for dc in DayCount::all() {
            assert_eq!(dc.to_string().parse::<DayCount>().unwrap(), *dc);
            assert_eq!(dc.name().parse::<DayCount>().unwrap(), *dc);
        }
    }

    #[test]
    fn test_serde_tags() {
        let json = serde_json::to_string(&DayCount::Thirty360E).unwrap();
        assert_eq!(json, "\"30E360\"");
        let parsed: DayCount = serde_json::from_str("\"ACTACTISDA\"").unwrap();
        assert_eq!(parsed, DayCount::ActActIsda);
    }
}
