//! Roll conventions: snapping schedule dates to an anchor day of the month.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FincalError, FincalResult};
use crate::types::Date;

/// Roll convention applied to each unadjusted schedule date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RollConvention {
    /// No rolling.
    #[default]
    Unadjusted,

    /// Keep the day of month produced by tenor arithmetic.
    DayOfMonth,

    /// Snap to the last calendar day of the month.
    EndOfMonth,

    /// Third Wednesday of the month. Not implemented.
    Imm,
}

impl RollConvention {
    /// Rolls a date.
    ///
    /// # Errors
    ///
    /// Returns `FincalError::NotImplemented` for `Imm`.
    pub fn roll(self, date: Date) -> FincalResult<Date> {
        match self {
            RollConvention::Unadjusted | RollConvention::DayOfMonth => Ok(date),
            RollConvention::EndOfMonth => Ok(date.end_of_month()),
            RollConvention::Imm => Err(FincalError::not_implemented("IMM roll convention")),
        }
    }

    /// Checks if this is the end-of-month convention.
    pub fn is_eom(self) -> bool {
        self == RollConvention::EndOfMonth
    }

    /// Checks that the convention can be rolled at all.
    ///
    /// # Errors
    ///
    /// Returns `FincalError::NotImplemented` for `Imm`.
    pub fn validate(self) -> FincalResult<()> {
        match self {
            RollConvention::Imm => Err(FincalError::not_implemented("IMM roll convention")),
            _ => Ok(()),
        }
    }

    /// Checks if the convention is valid for a walk anchored at `anchor`.
    ///
    /// End of month needs a month- or year-based step and a month-end anchor.
    /// Every other convention is always valid.
    pub fn is_valid_for(self, month_based_step: bool, anchor: Date) -> bool {
        !self.is_eom() || (month_based_step && anchor.is_end_of_month())
    }

    /// Returns the convention to use for a walk: end of month falls back to
    /// day of month when not valid for the step and anchor.
    pub fn effective_for(self, month_based_step: bool, anchor: Date) -> RollConvention {
        if self.is_valid_for(month_based_step, anchor) {
            self
        } else {
            RollConvention::DayOfMonth
        }
    }

    /// Returns the short tag (`NONE`, `D`, `EOM`, `IMM`).
    pub fn tag(self) -> &'static str {
        match self {
            RollConvention::Unadjusted => "NONE",
            RollConvention::DayOfMonth => "D",
            RollConvention::EndOfMonth => "EOM",
            RollConvention::Imm => "IMM",
        }
    }
}

impl fmt::Display for RollConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for RollConvention {
    type Err = FincalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NONE" | "U" | "UNADJUSTED" => Ok(RollConvention::Unadjusted),
            "D" | "DOM" | "DAYOFMONTH" => Ok(RollConvention::DayOfMonth),
            "EOM" | "ENDOFMONTH" => Ok(RollConvention::EndOfMonth),
            "IMM" => Ok(RollConvention::Imm),
            _ => Err(FincalError::unsupported(s, "roll convention")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_roll() {
        let date = d(2024, 2, 10);
        assert_eq!(RollConvention::Unadjusted.roll(date).unwrap(), date);
        assert_eq!(RollConvention::DayOfMonth.roll(date).unwrap(), date);
        assert_eq!(RollConvention::EndOfMonth.roll(date).unwrap(), d(2024, 2, 29));
    }

    #[test]
    fn test_imm_not_implemented() {
        let err = RollConvention::Imm.roll(d(2024, 3, 1)).unwrap_err();
        assert!(matches!(err, FincalError::NotImplemented { .. }));
        assert!(RollConvention::Imm.validate().is_err());
        assert!(RollConvention::EndOfMonth.validate().is_ok());
    }

    #[test]
    fn test_is_eom() {
        assert!(RollConvention::EndOfMonth.is_eom());
        assert!(!RollConvention::DayOfMonth.is_eom());
        assert!(!RollConvention::Unadjusted.is_eom());
    }

    #[test]
    fn test_eom_validity() {
        let month_end = d(2024, 1, 31);
        let mid_month = d(2024, 1, 15);
        assert!(RollConvention::EndOfMonth.is_valid_for(true, month_end));
        assert!(!RollConvention::EndOfMonth.is_valid_for(true, mid_month));
        assert!(!RollConvention::EndOfMonth.is_valid_for(false, month_end));
        assert!(RollConvention::DayOfMonth.is_valid_for(false, mid_month));

        assert_eq!(
            RollConvention::EndOfMonth.effective_for(false, month_end),
            RollConvention::DayOfMonth
        );
        assert_eq!(
            RollConvention::EndOfMonth.effective_for(true, month_end),
            RollConvention::EndOfMonth
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("EOM".parse::<RollConvention>().unwrap(), RollConvention::EndOfMonth);
        assert_eq!("d".parse::<RollConvention>().unwrap(), RollConvention::DayOfMonth);
        assert_eq!("IMM".parse::<RollConvention>().unwrap(), RollConvention::Imm);
        assert_eq!("NONE".parse::<RollConvention>().unwrap(), RollConvention::Unadjusted);
        assert!("SOM".parse::<RollConvention>().is_err());

        for roll in [
            RollConvention::Unadjusted,
            RollConvention::DayOfMonth,
            RollConvention::EndOfMonth,
            RollConvention::Imm,
        ] {
            assert_eq!(roll.to_string().parse::<RollConvention>().unwrap(), roll);
        }
    }
}
