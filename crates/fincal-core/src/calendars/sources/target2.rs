//! TARGET2 closing days for Eurozone payments and settlement (`TARGET`).

use std::ops::RangeInclusive;

use super::super::bitmap::{HolidayRules, Observance};
use crate::types::Date;

/// TARGET2 closing days.
///
/// - New Year's Day (January 1)
/// - Good Friday and Easter Monday
/// - Labour Day (May 1)
/// - Christmas Day and Boxing Day (December 25-26)
///
/// Weekend holidays are not observed on another day. National holidays of
/// member states are not closing days.
pub(crate) fn target2(years: RangeInclusive<i32>) -> Vec<Date> {
    HolidayRules::new(years)
        .fixed(1, 1, Observance::None)
        .easter(-2)
        .easter(1)
        .fixed(5, 1, Observance::None)
        .fixed(12, 25, Observance::None)
        .fixed(12, 26, Observance::None)
        // Year-end closures around the euro changeover
        .one_off([(1999, 12, 31), (2001, 12, 31)])
        .build()
}
