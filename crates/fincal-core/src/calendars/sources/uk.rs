//! England and Wales bank holidays (`GB`, `GB:ENG`, `GB:WLS`).

use std::ops::RangeInclusive;

use chrono::Weekday;

use super::super::bitmap::{last_weekday_of_month, nth_weekday_of_month, HolidayRules, Observance};
use crate::types::Date;

/// England and Wales bank holidays.
///
/// - New Year's Day (January 1, substitute Monday if weekend)
/// - Good Friday and Easter Monday
/// - Early May Bank Holiday (1st Monday in May)
/// - Spring Bank Holiday (last Monday in May)
/// - Summer Bank Holiday (last Monday in August)
/// - Christmas Day and Boxing Day (with substitutes)
///
/// Royal and jubilee one-off holidays are included for the years they apply.
pub(crate) fn england(years: RangeInclusive<i32>) -> Vec<Date> {
    HolidayRules::new(years)
        .fixed(1, 1, Observance::NextMonday)
        .easter(-2)
        .easter(1)
        .custom(early_may_bank_holiday)
        .custom(spring_bank_holiday)
        .last_weekday(8, Weekday::Mon)
        .custom(christmas)
        .one_off([
            // Millennium
            (1999, 12, 31),
            // Golden Jubilee
            (2002, 6, 3),
            // Royal Wedding
            (2011, 4, 29),
            // Diamond Jubilee
            (2012, 6, 5),
            // Platinum Jubilee
            (2022, 6, 3),
            // State Funeral of Queen Elizabeth II
            (2022, 9, 19),
            // Coronation of King Charles III
            (2023, 5, 8),
        ])
        .build()
}

/// 1st Monday in May, moved to 8 May for the VE Day anniversaries.
fn early_may_bank_holiday(year: i32) -> Vec<Date> {
    match year {
        1995 | 2020 => Date::from_ymd(year, 5, 8).ok().into_iter().collect(),
        _ => nth_weekday_of_month(year, 5, Weekday::Mon, 1)
            .into_iter()
            .collect(),
    }
}

/// Last Monday in May, moved for the 2002, 2012 and 2022 jubilees.
fn spring_bank_holiday(year: i32) -> Vec<Date> {
    let moved = match year {
        2002 | 2012 => Some((6, 4)),
        2022 => Some((6, 2)),
        _ => None,
    };
    match moved {
        Some((month, day)) => Date::from_ymd(year, month, day).ok().into_iter().collect(),
        None => last_weekday_of_month(year, 5, Weekday::Mon)
            .into_iter()
            .collect(),
    }
}

/// Christmas and Boxing Day, each pushed to the next free weekday.
fn christmas(year: i32) -> Vec<Date> {
    let (Ok(christmas), Ok(boxing_day)) = (
        Date::from_ymd(year, 12, 25),
        Date::from_ymd(year, 12, 26),
    ) else {
        return Vec::new();
    };

    let mut holidays = vec![christmas, boxing_day];
    match christmas.weekday() {
        // Sat/Sun: substitutes Mon 27 and Tue 28
        Weekday::Sat => holidays.extend([christmas.add_days(2), christmas.add_days(3)]),
        // Sun/Mon: Christmas substitute Tue 27
        Weekday::Sun => holidays.push(christmas.add_days(2)),
        // Fri/Sat: Boxing Day substitute Mon 28
        Weekday::Fri => holidays.push(christmas.add_days(3)),
        _ => {}
    }
    holidays
}
