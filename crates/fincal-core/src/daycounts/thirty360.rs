//! 30/360 day count conventions.

use super::DayCounter;
use crate::types::Date;

// =============================================================================
// Helper Functions
// =============================================================================

/// Day count on 30-day months from already-adjusted day numbers.
#[inline]
fn thirty_day_count(start: Date, end: Date, d1: u32, d2: u32) -> i64 {
    let years = i64::from(end.year() - start.year());
    let months = i64::from(end.month()) - i64::from(start.month());
    let days = i64::from(d2) - i64::from(d1);
    360 * years + 30 * months + days
}

// =============================================================================
// 30/360 (Bond Basis)
// =============================================================================

/// 30/360 day count convention (Bond Basis).
///
/// # Rules
///
/// 1. If D1 is 31, change D1 to 30
/// 2. If D2 is 31 AND D1 is now 30, change D2 to 30
///
/// # Formula
///
/// $$\text{Days} = 360 \times (Y_2 - Y_1) + 30 \times (M_2 - M_1) + (D_2 - D_1)$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360;

impl DayCounter for Thirty360 {
    fn name(&self) -> &'static str {
        "30/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        if end < start {
            return -self.day_count(end, start);
        }

        let d1 = start.day().min(30);
        let d2 = if end.day() == 31 && d1 == 30 {
            30
        } else {
            end.day()
        };

        thirty_day_count(start, end, d1, d2)
    }
}

// =============================================================================
// 30E/360 (Eurobond Basis)
// =============================================================================

/// 30E/360 day count convention (Eurobond Basis).
///
/// Any day 31 on either side becomes 30; no dependency between the dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCounter for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        if end < start {
            return -self.day_count(end, start);
        }

        thirty_day_count(start, end, start.day().min(30), end.day().min(30))
    }
}
