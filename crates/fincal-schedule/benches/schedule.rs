//! Benchmarks for schedule generation and calendar lookup.
//!
//! Run with: cargo bench -p fincal-schedule

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use fincal_core::calendars::{BDayAdjust, CalendarRegistry, RollConvention};
use fincal_core::types::Date;
use fincal_schedule::{business_day_series, Frequency, ScheduleBuilder, Tenor};

// =============================================================================
// CALENDARS
// =============================================================================

fn bench_calendar_lookup(c: &mut Criterion) {
    let registry = CalendarRegistry::new();
    registry.resolve("US+GB+TARGET").unwrap();

    let mut group = c.benchmark_group("calendar_lookup");
    for id in ["US", "US+GB+TARGET"] {
        group.bench_with_input(BenchmarkId::from_parameter(id), &id, |b, id| {
            b.iter(|| registry.resolve(black_box(id)).unwrap())
        });
    }
    group.finish();
}

fn bench_is_business_day(c: &mut Criterion) {
    let calendar = CalendarRegistry::global().resolve("US+GB").unwrap();
    let start = Date::from_ymd(2025, 1, 1).unwrap();
    let dates: Vec<Date> = (0..365).map(|i| start.add_days(i)).collect();

    let mut group = c.benchmark_group("is_business_day");
    group.throughput(Throughput::Elements(dates.len() as u64));
    group.bench_function("year", |b| {
        b.iter(|| {
            black_box(&dates)
                .iter()
                .filter(|d| calendar.is_business_day(**d))
                .count()
        })
    });
    group.finish();
}

// =============================================================================
// SCHEDULES
// =============================================================================

fn bench_frequency_schedules(c: &mut Criterion) {
    let calendar = CalendarRegistry::global().resolve("US").unwrap();
    let adjust = BDayAdjust::modified_following(calendar);
    let start = Date::from_ymd(2025, 1, 31).unwrap();

    let mut group = c.benchmark_group("frequency_schedule");
    for years in [5, 10, 30] {
        let end = Tenor::years(years).apply(start).unwrap();
        group.bench_with_input(BenchmarkId::new("quarterly_eom", years), &end, |b, end| {
            b.iter(|| {
                Frequency::Quarterly
                    .generate_schedule(
                        black_box(start).into(),
                        black_box(*end).into(),
                        None,
                        &adjust,
                        RollConvention::EndOfMonth,
                        true,
                        false,
                    )
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_daily_series(c: &mut Criterion) {
    let calendar = CalendarRegistry::global().resolve("US").unwrap();
    let start = Date::from_ymd(2025, 1, 1).unwrap();
    let end = Date::from_ymd(2026, 1, 1).unwrap();

    let mut group = c.benchmark_group("daily_series");
    group.bench_function("business_days_1y", |b| {
        b.iter(|| business_day_series(black_box(start), black_box(end), Some(calendar.clone())).unwrap())
    });
    group.bench_function("calendar_days_1y", |b| {
        b.iter(|| {
            ScheduleBuilder::new(Tenor::days(1), black_box(start), black_box(end))
                .inclusive(true)
                .generate()
                .unwrap()
        })
    });
    group.finish();
}

criterion_group!(calendars, bench_calendar_lookup, bench_is_business_day);
criterion_group!(schedules, bench_frequency_schedules, bench_daily_series);
criterion_main!(calendars, schedules);
