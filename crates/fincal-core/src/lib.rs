//! # Fincal Core
//!
//! Dates, holiday calendars, day counts and business day conventions for the
//! Fincal date engine.
//!
//! This crate provides the foundational building blocks used by schedule
//! generation:
//!
//! - **Types**: the `Date` newtype with month-end aware arithmetic
//! - **Calendars**: holiday sources, the calendar registry, business day
//!   adjustment and roll conventions
//! - **Day Count Conventions**: accrual fractions and unit fractions
//!
//! ## Example
//!
//! ```rust
//! use fincal_core::prelude::*;
//!
//! let registry = CalendarRegistry::new();
//! let us = registry.resolve("US").unwrap();
//!
//! // Saturday 2025-05-31 rolls back into May
//! let date = Date::from_ymd(2025, 5, 31).unwrap();
//! let adjusted = BusinessDayConvention::ModifiedFollowing.adjust(date, Some(&*us));
//! assert_eq!(adjusted, Date::from_ymd(2025, 5, 30).unwrap());
//!
//! let dcf = DayCount::Act360.dcf(date, adjusted, None).unwrap();
//! assert!(dcf < 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::cast_possible_truncation)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BDayAdjust, BusinessCalendar, BusinessDayConvention, CalendarId, CalendarRegistry,
        HolidaySource, RegistryConfig, RollConvention,
    };
    pub use crate::daycounts::{DayCount, DayCounter};
    pub use crate::error::{FincalError, FincalResult};
    pub use crate::types::Date;
}

// Re-export commonly used types at crate root
pub use calendars::{BDayAdjust, BusinessCalendar, BusinessDayConvention, CalendarRegistry};
pub use daycounts::DayCount;
pub use error::{FincalError, FincalResult};
pub use types::Date;
