//! Domain types.

mod date;

pub use date::Date;
pub(crate) use date::{days_in_month, is_leap_year};
