//! Japan market holidays (`JP`).
//!
//! National holidays plus the bank closing days (January 2-3 and December 31)
//! observed by the Tokyo markets.

use std::ops::RangeInclusive;

use chrono::Weekday;

use super::super::bitmap::{nth_weekday_of_month, HolidayRules};
use crate::types::Date;

/// Japan market holidays.
///
/// Applies the substitute holiday rule (a holiday on Sunday moves to the next
/// non-holiday) and the citizens' holiday rule (a day sandwiched between two
/// national holidays is itself a holiday).
pub(crate) fn japan(years: RangeInclusive<i32>) -> Vec<Date> {
    HolidayRules::new(years).custom(holidays_for_year).build()
}

fn holidays_for_year(year: i32) -> Vec<Date> {
    let mut national = national_holidays(year);
    national.sort_unstable();
    national.dedup();

    let mut holidays = national.clone();
    holidays.extend(citizens_holidays(&national));
    holidays.extend(substitute_holidays(&national));

    // Bank closing days
    for (month, day) in [(1, 2), (1, 3), (12, 31)] {
        holidays.extend(Date::from_ymd(year, month, day).ok());
    }
    holidays
}

fn national_holidays(year: i32) -> Vec<Date> {
    let mut holidays = Vec::new();
    let mut fixed = |month: u32, day: u32| holidays.extend(Date::from_ymd(year, month, day).ok());

    // New Year's Day
    fixed(1, 1);
    // National Foundation Day
    fixed(2, 11);
    // Emperor's Birthday
    if year >= 2020 {
        fixed(2, 23);
    } else if (1989..=2018).contains(&year) {
        fixed(12, 23);
    }
    fixed(3, vernal_equinox_day(year));
    // Showa Day, Constitution Memorial Day, Greenery Day, Children's Day
    fixed(4, 29);
    fixed(5, 3);
    fixed(5, 4);
    fixed(5, 5);

    // Marine Day
    match year {
        2020 => fixed(7, 23),
        2021 => fixed(7, 22),
        y if y < 2003 => fixed(7, 20),
        _ => {}
    }
    // Mountain Day
    match year {
        2020 => fixed(8, 10),
        2021 => fixed(8, 8),
        y if y >= 2016 => fixed(8, 11),
        _ => {}
    }
    // Respect for the Aged Day
    if year < 2003 {
        fixed(9, 15);
    }
    fixed(9, autumnal_equinox_day(year));
    // Sports Day
    match year {
        2020 => fixed(7, 24),
        2021 => fixed(7, 23),
        _ => {}
    }
    // Culture Day, Labour Thanksgiving Day
    fixed(11, 3);
    fixed(11, 23);

    // Imperial transition
    if year == 2019 {
        fixed(5, 1);
        fixed(10, 22);
    }

    let mut floating = |month: u32, n: u32| {
        holidays.extend(nth_weekday_of_month(year, month, Weekday::Mon, n));
    };
    // Coming of Age Day
    floating(1, 2);
    if year >= 2003 && year != 2020 && year != 2021 {
        floating(7, 3);
    }
    if year >= 2003 {
        floating(9, 3);
    }
    if year != 2020 && year != 2021 {
        floating(10, 2);
    }

    holidays
}

/// Days strictly between two national holidays one day apart.
fn citizens_holidays(national: &[Date]) -> Vec<Date> {
    national
        .windows(2)
        .filter(|pair| pair[1].days_between(&pair[0]) == -2)
        .map(|pair| pair[0].add_days(1))
        .filter(|day| day.weekday() != Weekday::Sun)
        .collect()
}

/// Next non-holiday after each national holiday falling on a Sunday.
fn substitute_holidays(national: &[Date]) -> Vec<Date> {
    let mut substitutes: Vec<Date> = Vec::new();
    for holiday in national.iter().filter(|d| d.weekday() == Weekday::Sun) {
        let mut substitute = holiday.add_days(1);
        while national.binary_search(&substitute).is_ok() || substitutes.contains(&substitute) {
            substitute = substitute.add_days(1);
        }
        substitutes.push(substitute);
    }
    substitutes
}

/// Vernal equinox day in March (valid 1980-2099).
fn vernal_equinox_day(year: i32) -> u32 {
    let y = f64::from(year - 1980);
    (20.8431 + 0.242194 * y - (y / 4.0).floor()) as u32
}

/// Autumnal equinox day in September (valid 1980-2099).
fn autumnal_equinox_day(year: i32) -> u32 {
    let y = f64::from(year - 1980);
    (23.2488 + 0.242194 * y - (y / 4.0).floor()) as u32
}
