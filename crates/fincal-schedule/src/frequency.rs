//! Payment frequencies and frequency-driven schedules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use fincal_core::calendars::{BDayAdjust, RollConvention};
use fincal_core::error::{FincalError, FincalResult};
use fincal_core::types::Date;

use crate::schedule::ScheduleBuilder;
use crate::tenor::Tenor;

/// Payment frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Once a year
    #[serde(rename = "A")]
    Annual,
    /// Twice a year
    #[default]
    #[serde(rename = "S")]
    SemiAnnual,
    /// Four times a year
    #[serde(rename = "Q")]
    Quarterly,
    /// Twelve times a year
    #[serde(rename = "M")]
    Monthly,
    /// Every week
    #[serde(rename = "W")]
    Weekly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
            Frequency::Weekly => 52,
        }
    }

    /// Returns the nominal year fraction of one period.
    #[must_use]
    pub fn unit_dcf(self) -> f64 {
        1.0 / f64::from(self.periods_per_year())
    }

    /// Returns the tenor of one period, negated when `backward`.
    #[must_use]
    pub fn to_tenor(self, backward: bool) -> Tenor {
        let sign = if backward { -1 } else { 1 };
        match self {
            Frequency::Annual => Tenor::years(sign),
            Frequency::SemiAnnual => Tenor::months(6 * sign),
            Frequency::Quarterly => Tenor::months(3 * sign),
            Frequency::Monthly => Tenor::months(sign),
            Frequency::Weekly => Tenor::weeks(sign),
        }
    }

    /// Returns the single letter tag.
    pub fn tag(self) -> &'static str {
        match self {
            Frequency::Annual => "A",
            Frequency::SemiAnnual => "S",
            Frequency::Quarterly => "Q",
            Frequency::Monthly => "M",
            Frequency::Weekly => "W",
        }
    }

    /// Generates a schedule stepping one period at a time.
    ///
    /// A tenor `start` is applied to `ref_date`; a tenor `end` is applied to
    /// the resolved start. Bounds are excluded.
    ///
    /// # Errors
    ///
    /// - `FincalError::InvalidInput` for a tenor start without `ref_date`
    /// - any error from [`ScheduleBuilder::generate`]
    #[allow(clippy::too_many_arguments)]
    pub fn generate_schedule(
        self,
        start: ScheduleBound,
        end: ScheduleBound,
        ref_date: Option<Date>,
        bd_adjust: &BDayAdjust,
        roll: RollConvention,
        step_backward: bool,
        extend_last: bool,
    ) -> FincalResult<Vec<Date>> {
        let from = match start {
            ScheduleBound::Date(date) => date,
            ScheduleBound::Tenor(tenor) => {
                let anchor = ref_date.ok_or_else(|| {
                    FincalError::invalid_input(format!(
                        "tenor start '{tenor}' needs a reference date"
                    ))
                })?;
                tenor.apply(anchor)?
            }
        };
        let to = match end {
            ScheduleBound::Date(date) => date,
            ScheduleBound::Tenor(tenor) => tenor.apply(from)?,
        };

        ScheduleBuilder::new(self.to_tenor(step_backward), from, to)
            .backward(step_backward)
            .with_adjust(bd_adjust.clone())
            .with_roll(roll)
            .extend_last(extend_last)
            .generate()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Frequency {
    type Err = FincalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" | "ANNUAL" => Ok(Frequency::Annual),
            "S" | "SEMIANNUAL" | "SEMI-ANNUAL" => Ok(Frequency::SemiAnnual),
            "Q" | "QUARTERLY" => Ok(Frequency::Quarterly),
            "M" | "MONTHLY" => Ok(Frequency::Monthly),
            "W" | "WEEKLY" => Ok(Frequency::Weekly),
            _ => Err(FincalError::unsupported(s, "frequency")),
        }
    }
}

/// A schedule bound: a fixed date or a tenor offset.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleBound {
    /// Fixed date.
    Date(Date),
    /// Offset from a reference date.
    Tenor(Tenor),
}

impl From<Date> for ScheduleBound {
    fn from(date: Date) -> Self {
        ScheduleBound::Date(date)
    }
}

impl From<Tenor> for ScheduleBound {
    fn from(tenor: Tenor) -> Self {
        ScheduleBound::Tenor(tenor)
    }
}
