//! Actual/360 and Actual/365 Fixed day count conventions.

use super::DayCounter;
use crate::types::Date;

/// Actual/360 day count convention.
///
/// The day count is the actual number of days between dates.
/// The year basis is always 360 days.
///
/// # Usage
///
/// - Money market instruments
/// - SOFR and other overnight-rate floating legs
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{360}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCounter for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/365 Fixed day count convention.
///
/// Always uses 365 as the year basis, regardless of leap years.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{365}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365;

impl DayCounter for Act365 {
    fn name(&self) -> &'static str {
        "ACT/365"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 365.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
