//! Rule-based holiday source.

use std::ops::RangeInclusive;

use super::{japan, target2, uk, us, HolidaySource};
use crate::error::{FincalError, FincalResult};
use crate::types::Date;

/// Holiday source generating calendars from recurring rules.
///
/// | code                         | calendar                           |
/// |------------------------------|------------------------------------|
/// | `US`                         | US federal holidays                |
/// | `US:NY`                      | New York State public holidays     |
/// | `XNYS` (`NYSE`)              | New York Stock Exchange closures   |
/// | `GB`, `GB:ENG`, `GB:WLS`     | England and Wales bank holidays    |
/// | `TARGET` (`TARGET2`)         | TARGET2 closing days               |
/// | `JP`                         | Japan market holidays              |
///
/// Codes are matched case-insensitively.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleHolidaySource;

impl RuleHolidaySource {
    /// Creates the rule source.
    pub fn new() -> Self {
        Self
    }

    /// Canonical calendar codes with rules.
    pub fn codes() -> &'static [&'static str] {
        &["US", "US:NY", "XNYS", "GB", "GB:ENG", "GB:WLS", "TARGET", "JP"]
    }
}

impl HolidaySource for RuleHolidaySource {
    fn holidays(
        &self,
        country: &str,
        subdivision: Option<&str>,
        years: RangeInclusive<i32>,
    ) -> FincalResult<Vec<Date>> {
        let code = country.to_ascii_uppercase();
        let subdiv = subdivision.map(str::to_ascii_uppercase);

        match (code.as_str(), subdiv.as_deref()) {
            ("US", None) => Ok(us::federal(years)),
            ("US", Some("NY")) => Ok(us::new_york(years)),
            ("XNYS" | "NYSE", None) => Ok(us::nyse(years)),
            ("GB" | "UK", None | Some("ENG" | "WLS")) => Ok(uk::england(years)),
            ("TARGET" | "TARGET2", None) => Ok(target2::target2(years)),
            ("JP", None) => Ok(japan::japan(years)),
            ("US" | "XNYS" | "NYSE" | "GB" | "UK" | "TARGET" | "TARGET2" | "JP", Some(_)) => {
                Err(FincalError::invalid_calendar(
                    format!("{country}:{}", subdivision.unwrap_or_default()),
                    "unknown subdivision",
                ))
            }
            _ => Err(FincalError::invalid_calendar(
                country,
                "no holiday rules for this code",
            )),
        }
    }
}
