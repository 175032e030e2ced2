//! # Fincal Schedule
//!
//! Tenors, schedule generation, frequencies and compounding for the Fincal
//! date engine.
//!
//! - **Tenors**: parsing and applying codes like `3M`, `1Y2M`, `2B`, `EOQ`
//! - **Schedules**: rolled and adjusted date series between two bounds
//! - **Frequencies**: period tenors and frequency-driven schedules
//! - **Compounding**: zero rate and discount factor conversions
//! - **Valuation dates**: last and current valuation dates around a cutoff
//!
//! ## Example
//!
//! ```rust
//! use fincal_core::prelude::*;
//! use fincal_schedule::prelude::*;
//!
//! let us = CalendarRegistry::global().resolve("US").unwrap();
//! let adjust = BDayAdjust::modified_following(us);
//!
//! let schedule = Frequency::Quarterly
//!     .generate_schedule(
//!         Date::from_ymd(2025, 1, 15).unwrap().into(),
//!         Tenor::years(1).into(),
//!         None,
//!         &adjust,
//!         RollConvention::Unadjusted,
//!         false,
//!         false,
//!     )
//!     .unwrap();
//! assert_eq!(schedule.len(), 3);
//!
//! let df = Compounding::SemiAnnual.discount_factor_from_rate(0.04, 1.0).unwrap();
//! assert!((df - 1.02f64.powi(-2)).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::uninlined_format_args)]

pub mod compounding;
pub mod frequency;
pub mod schedule;
pub mod tenor;
pub mod valuation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::compounding::Compounding;
    pub use crate::frequency::{Frequency, ScheduleBound};
    pub use crate::schedule::{business_day_series, ScheduleBuilder};
    pub use crate::tenor::{Tenor, TenorComponent, TenorUnit};
    pub use crate::valuation::{current_valuation_date, last_valuation_date, DEFAULT_CUTOFF};
}

// Re-export commonly used types at crate root
pub use compounding::Compounding;
pub use frequency::{Frequency, ScheduleBound};
pub use schedule::{business_day_series, ScheduleBuilder};
pub use tenor::Tenor;
