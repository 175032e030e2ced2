//! Business day calendars and conventions.
//!
//! This module provides:
//! - Holiday sources (rule-based and static lists)
//! - The calendar registry resolving identifiers such as `US:NY` or `US+TARGET`
//! - Business day adjustment and roll conventions

pub mod bitmap;
mod business;
mod config;
mod conventions;
mod id;
mod registry;
mod roll;
pub mod sources;

pub use bitmap::{
    easter_sunday, last_weekday_of_month, nth_weekday_of_month, HolidayBitmap, HolidayRules,
    Observance,
};
pub use business::{BusinessCalendar, WEEKENDS_ONLY};
pub use config::RegistryConfig;
pub use conventions::{BDayAdjust, BusinessDayConvention};
pub use id::{CalendarId, CalendarSpec};
pub use registry::CalendarRegistry;
pub use roll::RollConvention;
pub use sources::{HolidaySource, RuleHolidaySource, StaticHolidaySource};
