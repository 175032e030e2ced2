//! United States holiday rules: federal, New York State and NYSE.

use std::ops::RangeInclusive;

use chrono::Weekday;

use super::super::bitmap::{nth_weekday_of_month, HolidayRules, Observance};
use crate::types::Date;

/// US federal holidays (`US`).
///
/// - New Year's Day (January 1, observed)
/// - Martin Luther King Jr. Day (3rd Monday in January, since 1986)
/// - Washington's Birthday (3rd Monday in February)
/// - Memorial Day (last Monday in May)
/// - Juneteenth (June 19, observed, since 2021)
/// - Independence Day (July 4, observed)
/// - Labor Day (1st Monday in September)
/// - Columbus Day (2nd Monday in October)
/// - Veterans Day (November 11, observed)
/// - Thanksgiving Day (4th Thursday in November)
/// - Christmas Day (December 25, observed)
pub(crate) fn federal(years: RangeInclusive<i32>) -> Vec<Date> {
    federal_rules(years).build()
}

/// New York State public holidays (`US:NY`): federal plus state days.
pub(crate) fn new_york(years: RangeInclusive<i32>) -> Vec<Date> {
    federal_rules(years)
        // Lincoln's Birthday
        .fixed(2, 12, Observance::NearestWeekday)
        // Susan B. Anthony Day
        .fixed_from(2, 15, 2004, Observance::None)
        // Election Day: Tuesday after the first Monday in November
        .custom(|year| {
            if year < 2015 {
                return Vec::new();
            }
            nth_weekday_of_month(year, 11, Weekday::Mon, 1)
                .map(|monday| monday.add_days(1))
                .into_iter()
                .collect()
        })
        .build()
}

/// New York Stock Exchange full-day closures (`XNYS`).
///
/// New Year's Day falling on a Saturday is not observed on the preceding
/// Friday, which stays a trading day at year end.
pub(crate) fn nyse(years: RangeInclusive<i32>) -> Vec<Date> {
    HolidayRules::new(years)
        .fixed(1, 1, Observance::SundayToMonday)
        .custom(|year| {
            if year < 1998 {
                return Vec::new();
            }
            nth_weekday_of_month(year, 1, Weekday::Mon, 3)
                .into_iter()
                .collect()
        })
        .nth_weekday(2, Weekday::Mon, 3)
        // Good Friday
        .easter(-2)
        .last_weekday(5, Weekday::Mon)
        .fixed_from(6, 19, 2022, Observance::NearestWeekday)
        .fixed(7, 4, Observance::NearestWeekday)
        .nth_weekday(9, Weekday::Mon, 1)
        .nth_weekday(11, Weekday::Thu, 4)
        .fixed(12, 25, Observance::NearestWeekday)
        .one_off([
            // September 11 attacks
            (2001, 9, 11),
            (2001, 9, 12),
            (2001, 9, 13),
            (2001, 9, 14),
            // Reagan national day of mourning
            (2004, 6, 11),
            // Ford national day of mourning
            (2007, 1, 2),
            // Hurricane Sandy
            (2012, 10, 29),
            (2012, 10, 30),
            // G. H. W. Bush national day of mourning
            (2018, 12, 5),
            // Carter national day of mourning
            (2025, 1, 9),
        ])
        .build()
}

fn federal_rules(years: RangeInclusive<i32>) -> HolidayRules {
    HolidayRules::new(years)
        .fixed(1, 1, Observance::NearestWeekday)
        .custom(|year| {
            if year < 1986 {
                return Vec::new();
            }
            nth_weekday_of_month(year, 1, Weekday::Mon, 3)
                .into_iter()
                .collect()
        })
        .nth_weekday(2, Weekday::Mon, 3)
        .last_weekday(5, Weekday::Mon)
        .fixed_from(6, 19, 2021, Observance::NearestWeekday)
        .fixed(7, 4, Observance::NearestWeekday)
        .nth_weekday(9, Weekday::Mon, 1)
        .nth_weekday(10, Weekday::Mon, 2)
        .fixed(11, 11, Observance::NearestWeekday)
        .nth_weekday(11, Weekday::Thu, 4)
        .fixed(12, 25, Observance::NearestWeekday)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_federal_2025() {
        let hols = federal(2025..=2025);
        for date in [
            d(2025, 1, 1),
            d(2025, 1, 20),
            d(2025, 2, 17),
            d(2025, 5, 26),
            d(2025, 6, 19),
            d(2025, 7, 4),
            d(2025, 9, 1),
            d(2025, 10, 13),
            d(2025, 11, 11),
            d(2025, 11, 27),
            d(2025, 12, 25),
        ] {
            assert!(hols.contains(&date), "missing {date}");
        }
        assert_eq!(hols.len(), 11);
        // Federal calendar has no Good Friday and no mourning day closures
        assert!(!hols.contains(&d(2025, 4, 18)));
        assert!(!hols.contains(&d(2025, 1, 9)));
    }

    #[test]
    fn test_federal_observed() {
        // 2022-01-01 is a Saturday: observed on Friday 2021-12-31
        let hols = federal(2021..=2022);
        assert!(hols.contains(&d(2021, 12, 31)));
        // 2021-07-04 is a Sunday: observed Monday
        assert!(hols.contains(&d(2021, 7, 5)));
    }

    #[test]
    fn test_new_york_adds_state_days() {
        let hols = new_york(2025..=2025);
        assert!(hols.contains(&d(2025, 2, 12)));
        assert!(hols.contains(&d(2025, 2, 15)));
        // Election Day 2025: first Monday is Nov 3
        assert!(hols.contains(&d(2025, 11, 4)));
        assert!(hols.contains(&d(2025, 7, 4)));
    }

    #[test]
    fn test_nyse() {
        let hols = nyse(2021..=2025);
        // Good Friday
        assert!(hols.contains(&d(2025, 4, 18)));
        // Carter mourning day
        assert!(hols.contains(&d(2025, 1, 9)));
        // No Columbus or Veterans Day
        assert!(!hols.contains(&d(2025, 10, 13)));
        assert!(!hols.contains(&d(2025, 11, 11)));
        // 2022-01-01 Saturday: Friday 2021-12-31 stays open
        assert!(!hols.contains(&d(2021, 12, 31)));
        // Juneteenth not a market holiday before 2022
        assert!(!hols.contains(&d(2021, 6, 18)));
        assert!(hols.contains(&d(2022, 6, 20)));
    }
}
