//! Valuation dates relative to a wall-clock cutoff.
//!
//! Before the cutoff the current day's close is not yet available, so the
//! last valuation date is the previous business day. From the cutoff on, the
//! current valuation date moves to the next business day.

use chrono::{Local, NaiveDateTime, NaiveTime};

use fincal_core::calendars::{BusinessCalendar, BusinessDayConvention};
use fincal_core::types::Date;

/// Default end-of-day cutoff, 18:00.
pub const DEFAULT_CUTOFF: NaiveTime = match NaiveTime::from_hms_opt(18, 0, 0) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// Returns the most recent date with a completed close as of `now`.
///
/// On a non-business day this is the preceding business day; on a business
/// day before `cutoff` it is the previous business day; otherwise today.
pub fn last_valuation_date(
    now: NaiveDateTime,
    calendar: Option<&BusinessCalendar>,
    cutoff: NaiveTime,
) -> Date {
    let today = Date::from(now.date());
    let adjusted = BusinessDayConvention::Preceding.adjust(today, calendar);
    if adjusted < today {
        return adjusted;
    }
    if now.time() < cutoff {
        return step_business_day(today, -1, calendar);
    }
    today
}

/// Returns the date being valued as of `now`.
///
/// On a non-business day this is the following business day; on a business
/// day at or after `cutoff` it is the next business day; otherwise today.
pub fn current_valuation_date(
    now: NaiveDateTime,
    calendar: Option<&BusinessCalendar>,
    cutoff: NaiveTime,
) -> Date {
    let today = Date::from(now.date());
    let adjusted = BusinessDayConvention::Following.adjust(today, calendar);
    if adjusted > today {
        return adjusted;
    }
    if now.time() >= cutoff {
        return step_business_day(today, 1, calendar);
    }
    today
}

/// [`last_valuation_date`] at the local wall-clock time.
pub fn last_valuation_date_now(calendar: Option<&BusinessCalendar>, cutoff: NaiveTime) -> Date {
    last_valuation_date(Local::now().naive_local(), calendar, cutoff)
}

/// [`current_valuation_date`] at the local wall-clock time.
pub fn current_valuation_date_now(calendar: Option<&BusinessCalendar>, cutoff: NaiveTime) -> Date {
    current_valuation_date(Local::now().naive_local(), calendar, cutoff)
}

/// Nearest business day strictly after (`direction > 0`) or before `date`.
fn step_business_day(date: Date, direction: i64, calendar: Option<&BusinessCalendar>) -> Date {
    let convention = if direction > 0 {
        BusinessDayConvention::Following
    } else {
        BusinessDayConvention::Preceding
    };
    convention.adjust(date.add_days(direction), calendar)
}
