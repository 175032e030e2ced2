//! Tenors: parsed, composable date offsets.
//!
//! A tenor is an ordered list of components such as `1Y`, `-3M`, `2B` or
//! `1EOQ`, applied to a date left to right.
//!
//! # Grammar
//!
//! One or more components `[+-]?digits UNIT`, where UNIT (case-insensitive)
//! is one of:
//!
//! | unit          | meaning                          |
//! |---------------|----------------------------------|
//! | `B`           | business days                    |
//! | `D`, `W`      | calendar days, weeks             |
//! | `M`, `Y`      | months, years (month-end clamped)|
//! | `BOM` / `SOM` | month begin                      |
//! | `EOM`         | month end                        |
//! | `EOQ`         | quarter end                      |
//! | `EOY`         | year end                         |
//!
//! # Example
//!
//! ```rust
//! use fincal_schedule::Tenor;
//! use fincal_core::types::Date;
//!
//! let tenor: Tenor = "1Y6M".parse().unwrap();
//! let date = Date::from_ymd(2024, 8, 31).unwrap();
//! assert_eq!(tenor.apply(date).unwrap(), Date::from_ymd(2026, 2, 28).unwrap());
//! ```

use std::fmt;
use std::ops::{Add, Neg};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use fincal_core::calendars::{BDayAdjust, BusinessCalendar};
use fincal_core::error::{FincalError, FincalResult};
use fincal_core::types::Date;

/// Unit of a tenor component.
#[derive(Debug, Clone)]
pub enum TenorUnit {
    /// Business days on a calendar (weekends only when `None`).
    BusinessDays(Option<Arc<BusinessCalendar>>),
    /// Calendar days.
    Days,
    /// Weeks of seven calendar days.
    Weeks,
    /// Calendar months, clamped to the month end.
    Months,
    /// Calendar years, 29-Feb clamped to 28-Feb.
    Years,
    /// First day of a month.
    MonthBegin,
    /// Last day of a month.
    MonthEnd,
    /// Last day of March, June, September or December.
    QuarterEnd,
    /// 31 December.
    YearEnd,
}

impl TenorUnit {
    /// Returns the code suffix (`B`, `D`, `W`, `M`, `Y`, `BOM`, `EOM`, `EOQ`, `EOY`).
    pub fn suffix(&self) -> &'static str {
        match self {
            TenorUnit::BusinessDays(_) => "B",
            TenorUnit::Days => "D",
            TenorUnit::Weeks => "W",
            TenorUnit::Months => "M",
            TenorUnit::Years => "Y",
            TenorUnit::MonthBegin => "BOM",
            TenorUnit::MonthEnd => "EOM",
            TenorUnit::QuarterEnd => "EOQ",
            TenorUnit::YearEnd => "EOY",
        }
    }

    /// Checks if the unit is a month or year step.
    pub fn is_month_based(&self) -> bool {
        matches!(self, TenorUnit::Months | TenorUnit::Years)
    }
}

impl PartialEq for TenorUnit {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TenorUnit::BusinessDays(a), TenorUnit::BusinessDays(b)) => {
                a.as_ref().map(|c| c.id()) == b.as_ref().map(|c| c.id())
            }
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

/// One signed step of a tenor.
#[derive(Debug, Clone, PartialEq)]
pub struct TenorComponent {
    /// Number of units; negative steps backward.
    pub count: i32,
    /// Unit of the step.
    pub unit: TenorUnit,
}

impl TenorComponent {
    /// Creates a component.
    pub fn new(count: i32, unit: TenorUnit) -> Self {
        Self { count, unit }
    }

    /// Applies this component to a date.
    ///
    /// # Errors
    ///
    /// Returns `FincalError::InvalidDate` if the result leaves the supported
    /// date range.
    pub fn apply(&self, date: Date) -> FincalResult<Date> {
        let n = self.count;
        match &self.unit {
            TenorUnit::Days => date.checked_add_days(i64::from(n)),
            TenorUnit::Weeks => date.checked_add_weeks(i64::from(n)),
            TenorUnit::Months => date.add_months(n),
            TenorUnit::Years => date.add_years(n),
            TenorUnit::BusinessDays(calendar) => {
                let weekends;
                let calendar: &BusinessCalendar = match calendar {
                    Some(calendar) => calendar.as_ref(),
                    None => {
                        weekends = BusinessCalendar::weekends_only();
                        weekends.as_ref()
                    }
                };
                if n == 0 {
                    Ok(calendar.next_business_day(date))
                } else {
                    calendar.add_business_days(date, n)
                }
            }
            TenorUnit::MonthBegin => Anchor::MonthBegin.offset(date, n),
            TenorUnit::MonthEnd => Anchor::MonthEnd.offset(date, n),
            TenorUnit::QuarterEnd => Anchor::QuarterEnd.offset(date, n),
            TenorUnit::YearEnd => Anchor::YearEnd.offset(date, n),
        }
    }
}

impl fmt::Display for TenorComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}

/// Period anchors reached by the `BOM`/`EOM`/`EOQ`/`EOY` units.
#[derive(Debug, Clone, Copy)]
enum Anchor {
    MonthBegin,
    MonthEnd,
    QuarterEnd,
    YearEnd,
}

impl Anchor {
    fn months(self) -> i32 {
        match self {
            Anchor::MonthBegin | Anchor::MonthEnd => 1,
            Anchor::QuarterEnd => 3,
            Anchor::YearEnd => 12,
        }
    }

    fn contains(self, date: Date) -> bool {
        match self {
            Anchor::MonthBegin => date.is_start_of_month(),
            Anchor::MonthEnd => date.is_end_of_month(),
            Anchor::QuarterEnd => date.is_end_of_quarter(),
            Anchor::YearEnd => date.is_end_of_year(),
        }
    }

    /// Snaps an anchor-month date back onto the anchor day.
    fn snap(self, date: Date) -> Date {
        match self {
            Anchor::MonthBegin => date.start_of_month(),
            _ => date.end_of_month(),
        }
    }

    /// First anchor strictly after `date`.
    fn next_after(self, date: Date) -> Date {
        let next = date.add_days(1);
        match self {
            Anchor::MonthBegin => date.end_of_month().add_days(1),
            Anchor::MonthEnd => next.end_of_month(),
            Anchor::QuarterEnd => next.end_of_quarter(),
            Anchor::YearEnd => next.end_of_year(),
        }
    }

    /// Last anchor strictly before `date`.
    fn previous_before(self, date: Date) -> FincalResult<Date> {
        Ok(match self {
            Anchor::MonthBegin => date.add_days(-1).start_of_month(),
            Anchor::MonthEnd => date.start_of_month().add_days(-1),
            Anchor::QuarterEnd => date.end_of_quarter().add_months(-3)?.end_of_month(),
            Anchor::YearEnd => date.start_of_year().add_days(-1),
        })
    }

    /// `n > 0`: n-th anchor after; `n < 0`: |n|-th anchor before;
    /// `n == 0`: `date` if on an anchor, else the next one.
    fn offset(self, date: Date, n: i32) -> FincalResult<Date> {
        let (first, remaining) = match n.signum() {
            0 if self.contains(date) => return Ok(date),
            0 => return Ok(self.next_after(date)),
            1 => (self.next_after(date), n - 1),
            _ => (self.previous_before(date)?, n + 1),
        };
        if remaining == 0 {
            return Ok(first);
        }
        let months = remaining
            .checked_mul(self.months())
            .ok_or_else(|| FincalError::invalid_date(format!("{n} anchors from {date}")))?;
        Ok(self.snap(first.add_months(months)?))
    }
}

/// A composable date offset.
///
/// Immutable; composition with `+` builds a new tenor whose components are
/// applied in order. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tenor {
    components: Vec<TenorComponent>,
}

impl Tenor {
    /// Creates a single-component tenor.
    pub fn new(count: i32, unit: TenorUnit) -> Self {
        Self {
            components: vec![TenorComponent::new(count, unit)],
        }
    }

    /// Creates a tenor from components.
    ///
    /// # Errors
    ///
    /// Returns `FincalError::InvalidTenor` if `components` is empty.
    pub fn from_components(components: Vec<TenorComponent>) -> FincalResult<Self> {
        if components.is_empty() {
            return Err(FincalError::invalid_tenor("", "no components"));
        }
        Ok(Self { components })
    }

    /// `n` calendar days.
    pub fn days(n: i32) -> Self {
        Self::new(n, TenorUnit::Days)
    }

    /// `n` weeks.
    pub fn weeks(n: i32) -> Self {
        Self::new(n, TenorUnit::Weeks)
    }

    /// `n` months.
    pub fn months(n: i32) -> Self {
        Self::new(n, TenorUnit::Months)
    }

    /// `n` years.
    pub fn years(n: i32) -> Self {
        Self::new(n, TenorUnit::Years)
    }

    /// `n` business days on `calendar` (weekends only when `None`).
    pub fn bday(n: i32, calendar: Option<Arc<BusinessCalendar>>) -> Self {
        Self::new(n, TenorUnit::BusinessDays(calendar))
    }

    /// Parses a tenor code; business day components use weekends only.
    ///
    /// # Errors
    ///
    /// Returns `FincalError::InvalidTenor` naming the code when it is shorter
    /// than two characters, a component lacks its count or the unit is
    /// unknown.
    pub fn parse(code: &str) -> FincalResult<Self> {
        parse_components(code, None)
    }

    /// Parses a tenor code whose business day components use `calendar`.
    pub fn parse_with_calendar(code: &str, calendar: Arc<BusinessCalendar>) -> FincalResult<Self> {
        parse_components(code, Some(&calendar))
    }

    /// Returns the components in application order.
    pub fn components(&self) -> &[TenorComponent] {
        &self.components
    }

    /// Applies every component to `date`, left to right.
    ///
    /// # Errors
    ///
    /// Returns `FincalError::InvalidDate` if the result leaves the supported
    /// date range.
    pub fn apply(&self, date: Date) -> FincalResult<Date> {
        self.components
            .iter()
            .try_fold(date, |acc, component| component.apply(acc))
    }

    /// Applies the tenor, then adjusts the result.
    pub fn get_date(&self, date: Date, bd_adjust: &BDayAdjust) -> FincalResult<Date> {
        Ok(bd_adjust.adjust(self.apply(date)?))
    }

    /// Checks if the leading component steps backward.
    pub fn is_backward(&self) -> bool {
        self.components.first().is_some_and(|c| c.count < 0)
    }

    /// Checks if every component has a zero count.
    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|c| c.count == 0)
    }

    /// Checks if every component is a month or year step.
    pub fn is_month_based(&self) -> bool {
        self.components.iter().all(|c| c.unit.is_month_based())
    }
}

fn parse_components(code: &str, calendar: Option<&Arc<BusinessCalendar>>) -> FincalResult<Tenor> {
    let trimmed = code.trim();
    if trimmed.len() < 2 {
        return Err(FincalError::invalid_tenor(code, "too short"));
    }

    let upper = trimmed.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    let mut components = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        if matches!(bytes[pos], b'+' | b'-') {
            pos += 1;
        }
        let digits_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == digits_start {
            return Err(FincalError::invalid_tenor(code, "missing count"));
        }
        let count: i32 = upper[start..pos]
            .parse()
            .map_err(|_| FincalError::invalid_tenor(code, "count out of range"))?;

        let rest = &upper[pos..];
        let (unit, width) = if let Some(anchor) = parse_anchor(rest) {
            (anchor, 3)
        } else {
            let unit = match bytes.get(pos) {
                Some(b'B') => TenorUnit::BusinessDays(calendar.cloned()),
                Some(b'D') => TenorUnit::Days,
                Some(b'W') => TenorUnit::Weeks,
                Some(b'M') => TenorUnit::Months,
                Some(b'Y') => TenorUnit::Years,
                Some(_) => return Err(FincalError::invalid_tenor(code, "unknown unit")),
                None => return Err(FincalError::invalid_tenor(code, "missing unit")),
            };
            (unit, 1)
        };
        pos += width;
        components.push(TenorComponent::new(count, unit));
    }

    Ok(Tenor { components })
}

fn parse_anchor(rest: &str) -> Option<TenorUnit> {
    match rest.get(..3)? {
        "BOM" | "SOM" => Some(TenorUnit::MonthBegin),
        "EOM" => Some(TenorUnit::MonthEnd),
        "EOQ" => Some(TenorUnit::QuarterEnd),
        "EOY" => Some(TenorUnit::YearEnd),
        _ => None,
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for component in &self.components {
            write!(f, "{component}")?;
        }
        Ok(())
    }
}

impl FromStr for Tenor {
    type Err = FincalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Tenor {
    type Error = FincalError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::parse(&code)
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}

impl Add for Tenor {
    type Output = Tenor;

    /// Concatenates components: `self` first, then `rhs`.
    fn add(mut self, rhs: Tenor) -> Tenor {
        self.components.extend(rhs.components);
        self
    }
}

impl Neg for Tenor {
    type Output = Tenor;

    /// Negates every component.
    fn neg(mut self) -> Tenor {
        for component in &mut self.components {
            component.count = component.count.saturating_neg();
        }
        self
    }
}
