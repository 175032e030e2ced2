//! End-to-end schedule scenarios on registry calendars, plus property tests
//! for schedule ordering and compounding round trips.

use std::sync::Arc;

use approx::assert_relative_eq;
use fincal_core::calendars::{BDayAdjust, BusinessDayConvention, CalendarRegistry, RollConvention};
use fincal_core::daycounts::DayCount;
use fincal_core::types::Date;
use fincal_schedule::prelude::*;
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_us_business_day_series() {
    let us = CalendarRegistry::global().resolve("US").unwrap();
    let dates = business_day_series(d(2025, 1, 1), d(2025, 1, 10), Some(us)).unwrap();
    assert_eq!(
        dates,
        vec![
            d(2025, 1, 2),
            d(2025, 1, 3),
            d(2025, 1, 6),
            d(2025, 1, 7),
            d(2025, 1, 8),
            d(2025, 1, 9),
            d(2025, 1, 10),
        ]
    );
}

#[test]
fn test_business_day_series_matches_calendar() {
    let calendar = CalendarRegistry::global().resolve("GB+TARGET").unwrap();
    let (from, to) = (d(2025, 3, 1), d(2025, 6, 30));
    let dates = business_day_series(from, to, Some(Arc::clone(&calendar))).unwrap();
    assert_eq!(dates, calendar.business_days(from, to));
    // Good Friday and Easter Monday are closed on both
    assert!(!dates.contains(&d(2025, 4, 18)));
    assert!(!dates.contains(&d(2025, 4, 21)));
}

#[test]
fn test_quarterly_backward_eom_via_tenor() {
    let dates = Tenor::parse("-3M")
        .unwrap()
        .generate_series(
            d(2024, 1, 31),
            d(2025, 1, 31),
            true,
            &BDayAdjust::unadjusted(),
            RollConvention::EndOfMonth,
            false,
            false,
        )
        .unwrap();
    assert_eq!(dates, vec![d(2024, 4, 30), d(2024, 7, 31), d(2024, 10, 31)]);
}

#[test]
fn test_semiannual_swap_schedule_modified_following() {
    let calendar = CalendarRegistry::global().resolve("US+GB").unwrap();
    let adjust = BDayAdjust::modified_following(calendar);
    let dates = Frequency::SemiAnnual
        .generate_schedule(
            d(2025, 5, 31).into(),
            d(2027, 5, 31).into(),
            None,
            &adjust,
            RollConvention::EndOfMonth,
            false,
            true,
        )
        .unwrap();
    assert_eq!(
        dates,
        vec![
            d(2025, 11, 28),
            d(2026, 5, 29),
            d(2026, 11, 30),
            d(2027, 5, 28),
        ]
    );
}

#[test]
fn test_spot_start_from_reference_date() {
    let us = CalendarRegistry::global().resolve("US").unwrap();
    let spot = Tenor::parse_with_calendar("2B", Arc::clone(&us)).unwrap();
    // Thursday 3 July 2025: spot skips Independence Day and the weekend
    let dates = Frequency::Monthly
        .generate_schedule(
            spot.into(),
            Tenor::months(3).into(),
            Some(d(2025, 7, 3)),
            &BDayAdjust::following(us),
            RollConvention::Unadjusted,
            false,
            false,
        )
        .unwrap();
    assert_eq!(dates, vec![d(2025, 8, 8), d(2025, 9, 8)]);
}

#[test]
fn test_tenor_get_date_and_dcf() {
    let target = CalendarRegistry::global().resolve("TARGET").unwrap();
    let adjust = BDayAdjust::new(BusinessDayConvention::ModifiedFollowing, Some(target));
    let start = d(2025, 1, 31);
    let end = Tenor::parse("3M").unwrap().get_date(start, &adjust).unwrap();
    assert_eq!(end, d(2025, 4, 30));
    assert_relative_eq!(
        DayCount::Act360.dcf(start, end, None).unwrap(),
        89.0 / 360.0,
        epsilon = 1e-15
    );
}

#[test]
fn test_schedule_config_serde() {
    #[derive(Serialize, Deserialize)]
    struct LegConfig {
        tenor: Tenor,
        frequency: Frequency,
        compounding: Compounding,
        day_count: DayCount,
        roll: RollConvention,
    }

    let json = r#"{
        "tenor": "5Y",
        "frequency": "Q",
        "compounding": "CON",
        "day_count": "ACT360",
        "roll": "EndOfMonth"
    }"#;
    let config: LegConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.tenor, Tenor::years(5));
    assert_eq!(config.frequency, Frequency::Quarterly);
    assert_eq!(config.compounding, Compounding::Continuous);
    assert_eq!(config.day_count, DayCount::Act360);
    assert_eq!(config.roll, RollConvention::EndOfMonth);

    let back: serde_json::Value = serde_json::to_value(&config).unwrap();
    assert_eq!(back["tenor"], "5Y");
    assert!(serde_json::from_str::<LegConfig>(&json.replace("5Y", "5X")).is_err());
}

// ============================================================================
// Property tests
// ============================================================================

fn date_strategy() -> impl Strategy<Value = Date> {
    (2000i32..2050i32, 1u32..13u32, 1u32..32u32)
        .prop_filter_map("valid date", |(y, m, day)| Date::from_ymd(y, m, day).ok())
}

fn tenor_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("1D"),
        Just("3D"),
        Just("1W"),
        Just("2W"),
        Just("1M"),
        Just("3M"),
        Just("6M"),
        Just("1Y"),
        Just("1M2W"),
        Just("2B"),
    ]
}

fn convention_strategy() -> impl Strategy<Value = BusinessDayConvention> {
    prop_oneof![
        Just(BusinessDayConvention::Unadjusted),
        Just(BusinessDayConvention::Following),
        Just(BusinessDayConvention::Preceding),
        Just(BusinessDayConvention::ModifiedFollowing),
    ]
}

fn roll_strategy() -> impl Strategy<Value = RollConvention> {
    prop_oneof![
        Just(RollConvention::Unadjusted),
        Just(RollConvention::DayOfMonth),
        Just(RollConvention::EndOfMonth),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_schedule_strictly_increasing(
        from in date_strategy(),
        span in 0i64..1500,
        code in tenor_strategy(),
        convention in convention_strategy(),
        roll in roll_strategy(),
        backward in any::<bool>(),
        extend_last in any::<bool>(),
        inclusive in any::<bool>(),
    ) {
        let calendar = CalendarRegistry::global().resolve("US+GB").unwrap();
        let to = from.add_days(span);
        let tenor = Tenor::parse_with_calendar(code, calendar.clone()).unwrap();
        let tenor = if backward { -tenor } else { tenor };
        let adjust = BDayAdjust::new(convention, Some(calendar));

        let dates = tenor
            .generate_series(from, to, backward, &adjust, roll, extend_last, inclusive)
            .unwrap();
        for pair in dates.windows(2) {
            prop_assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn prop_exclusive_schedule_within_bounds(
        from in date_strategy(),
        span in 0i64..1500,
        code in tenor_strategy(),
    ) {
        let to = from.add_days(span);
        let tenor = Tenor::parse(code).unwrap();
        let dates = ScheduleBuilder::new(tenor, from, to).generate().unwrap();
        for date in &dates {
            prop_assert!(from < *date && *date < to);
        }
    }

    #[test]
    fn prop_frequency_schedule_length(
        from in date_strategy(),
        years in 1i32..10,
        freq in prop_oneof![
            Just(Frequency::Annual),
            Just(Frequency::SemiAnnual),
            Just(Frequency::Quarterly),
            Just(Frequency::Monthly),
        ],
    ) {
        let to = Tenor::years(years).apply(from).unwrap();
        let dates = freq
            .generate_schedule(
                from.into(),
                to.into(),
                None,
                &BDayAdjust::unadjusted(),
                RollConvention::Unadjusted,
                false,
                false,
            )
            .unwrap();
        // Interior points only; month-end clamping can pull one more step
        // inside the end bound
        let periods = (years as u32 * freq.periods_per_year()) as usize;
        prop_assert!(dates.len() + 1 >= periods && dates.len() <= periods);
    }

    #[test]
    fn prop_compounding_round_trip(
        df in 0.01f64..=1.0,
        dcf in 0.01f64..30.0,
        compounding in prop_oneof![
            Just(Compounding::Annual),
            Just(Compounding::SemiAnnual),
            Just(Compounding::Quarterly),
            Just(Compounding::Monthly),
            Just(Compounding::Daily),
            Just(Compounding::Continuous),
            Just(Compounding::Simple),
        ],
    ) {
        let rate = compounding.rate_from_discount_factor(df, dcf).unwrap();
        let back = compounding.discount_factor_from_rate(rate, dcf).unwrap();
        prop_assert!((back - df).abs() < 1e-10, "{compounding}: {df} -> {rate} -> {back}");
    }
}
