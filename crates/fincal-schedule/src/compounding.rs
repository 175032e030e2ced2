//! Compounding conventions: converting between zero rates and discount
//! factors.
//!
//! | Convention | Rate from `df`                  | Discount factor       |
//! |------------|---------------------------------|-----------------------|
//! | Continuous | `-ln(df) / t`                   | `exp(-r t)`           |
//! | Simple     | `(1/df - 1) / t`                | `1 / (1 + r t)`       |
//! | Periodic   | `(df^(-u/t) - 1) / u`           | `(1 + r u)^(-t/u)`    |
//!
//! `t` is the year fraction to the cash flow and `u` the year fraction of one
//! compounding period: the frequency unit for A/S/Q/M, and one day of the
//! day count (ACT/365 by default) for daily compounding.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use fincal_core::daycounts::DayCount;
use fincal_core::error::{FincalError, FincalResult};

use crate::frequency::Frequency;

/// Interest compounding convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Compounding {
    /// Annual compounding
    #[serde(rename = "A")]
    Annual,
    /// Semi-annual compounding
    #[serde(rename = "S")]
    SemiAnnual,
    /// Quarterly compounding
    #[serde(rename = "Q")]
    Quarterly,
    /// Monthly compounding
    #[serde(rename = "M")]
    Monthly,
    /// Daily compounding on a day count unit
    #[serde(rename = "D")]
    Daily,
    /// Continuous compounding
    #[default]
    #[serde(rename = "CON")]
    Continuous,
    /// Simple interest
    #[serde(rename = "SIM")]
    Simple,
}

impl Compounding {
    /// Extracts the zero rate implied by a discount factor.
    ///
    /// # Errors
    ///
    /// Returns `FincalError::InvalidInput` if `df <= 0` or `dcf <= 0`.
    pub fn rate_from_discount_factor(self, df: f64, dcf: f64) -> FincalResult<f64> {
        self.rate_from_discount_factor_with_day_count(df, dcf, DayCount::Act365)
    }

    /// Like [`Compounding::rate_from_discount_factor`], with daily
    /// compounding on one day of `day_count`.
    ///
    /// # Errors
    ///
    /// Returns `FincalError::InvalidInput` if `df <= 0` or `dcf <= 0`, and
    /// `FincalError::UnsupportedConvention` if daily compounding is asked of
    /// a day count without a fixed unit.
    pub fn rate_from_discount_factor_with_day_count(
        self,
        df: f64,
        dcf: f64,
        day_count: DayCount,
    ) -> FincalResult<f64> {
        if df.is_nan() || df <= 0.0 {
            return Err(FincalError::invalid_input(format!(
                "discount factor must be positive, got {df}"
            )));
        }
        if dcf.is_nan() || dcf <= 0.0 {
            return Err(FincalError::invalid_input(format!(
                "year fraction must be positive to extract a rate, got {dcf}"
            )));
        }

        let rate = match self.period_unit(day_count)? {
            None if self == Compounding::Continuous => -df.ln() / dcf,
            None => (1.0 / df - 1.0) / dcf,
            Some(unit) => (df.powf(-unit / dcf) - 1.0) / unit,
        };
        Ok(rate)
    }

    /// Computes the discount factor for a zero rate.
    ///
    /// Returns 1.0 for a zero year fraction.
    pub fn discount_factor_from_rate(self, rate: f64, dcf: f64) -> FincalResult<f64> {
        self.discount_factor_from_rate_with_day_count(rate, dcf, DayCount::Act365)
    }

    /// Like [`Compounding::discount_factor_from_rate`], with daily
    /// compounding on one day of `day_count`.
    #[allow(clippy::float_cmp)]
    pub fn discount_factor_from_rate_with_day_count(
        self,
        rate: f64,
        dcf: f64,
        day_count: DayCount,
    ) -> FincalResult<f64> {
        if dcf == 0.0 {
            return Ok(1.0);
        }

        let df = match self.period_unit(day_count)? {
            None if self == Compounding::Continuous => (-rate * dcf).exp(),
            None => 1.0 / (1.0 + rate * dcf),
            Some(unit) => (1.0 + rate * unit).powf(-dcf / unit),
        };
        Ok(df)
    }

    /// Year fraction of one compounding period, `None` for continuous and
    /// simple.
    fn period_unit(self, day_count: DayCount) -> FincalResult<Option<f64>> {
        let unit = match self {
            Compounding::Annual => Frequency::Annual.unit_dcf(),
            Compounding::SemiAnnual => Frequency::SemiAnnual.unit_dcf(),
            Compounding::Quarterly => Frequency::Quarterly.unit_dcf(),
            Compounding::Monthly => Frequency::Monthly.unit_dcf(),
            Compounding::Daily => day_count.unit_dcf(None)?,
            Compounding::Continuous | Compounding::Simple => return Ok(None),
        };
        Ok(Some(unit))
    }

    /// Returns the short tag.
    pub fn tag(self) -> &'static str {
        match self {
            Compounding::Annual => "A",
            Compounding::SemiAnnual => "S",
            Compounding::Quarterly => "Q",
            Compounding::Monthly => "M",
            Compounding::Daily => "D",
            Compounding::Continuous => "CON",
            Compounding::Simple => "SIM",
        }
    }

    /// Returns all conventions.
    pub fn all() -> &'static [Compounding] {
        &[
            Compounding::Annual,
            Compounding::SemiAnnual,
            Compounding::Quarterly,
            Compounding::Monthly,
            Compounding::Daily,
            Compounding::Continuous,
            Compounding::Simple,
        ]
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Compounding {
    type Err = FincalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" | "ANNUAL" => Ok(Compounding::Annual),
            "S" | "SEMIANNUAL" | "SEMI-ANNUAL" => Ok(Compounding::SemiAnnual),
            "Q" | "QUARTERLY" => Ok(Compounding::Quarterly),
            "M" | "MONTHLY" => Ok(Compounding::Monthly),
            "D" | "DAILY" => Ok(Compounding::Daily),
            "CON" | "CONTINUOUS" => Ok(Compounding::Continuous),
            "SIM" | "SIMPLE" => Ok(Compounding::Simple),
            _ => Err(FincalError::unsupported(s, "compounding")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_continuous() {
        let df = Compounding::Continuous.discount_factor_from_rate(0.05, 2.0).unwrap();
        assert_relative_eq!(df, (-0.1f64).exp(), epsilon = 1e-15);
        let rate = Compounding::Continuous.rate_from_discount_factor(df, 2.0).unwrap();
        assert_relative_eq!(rate, 0.05, epsilon = 1e-14);
    }

    #[test]
    fn test_simple() {
        let df = Compounding::Simple.discount_factor_from_rate(0.04, 0.5).unwrap();
        assert_relative_eq!(df, 1.0 / 1.02, epsilon = 1e-15);
        let rate = Compounding::Simple.rate_from_discount_factor(0.98, 0.25).unwrap();
        assert_relative_eq!(rate, (1.0 / 0.98 - 1.0) / 0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_periodic() {
        // Semi-annual 6% over two years: 1.03^-4
        let df = Compounding::SemiAnnual.discount_factor_from_rate(0.06, 2.0).unwrap();
        assert_relative_eq!(df, 1.03f64.powi(-4), epsilon = 1e-14);

        let rate = Compounding::Annual.rate_from_discount_factor(0.9, 1.0).unwrap();
        assert_relative_eq!(rate, 1.0 / 0.9 - 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_daily_units() {
        let df = Compounding::Daily.discount_factor_from_rate(0.0365, 1.0).unwrap();
        assert_relative_eq!(df, 1.0001f64.powf(-365.0), epsilon = 1e-14);

        let df360 = Compounding::Daily
            .discount_factor_from_rate_with_day_count(0.036, 1.0, DayCount::Act360)
            .unwrap();
        assert_relative_eq!(df360, 1.0001f64.powf(-360.0), epsilon = 1e-14);

        assert!(matches!(
            Compounding::Daily.discount_factor_from_rate_with_day_count(0.05, 1.0, DayCount::ActAct),
            Err(FincalError::UnsupportedConvention { .. })
        ));
        // Day count only matters for daily compounding
        assert!(Compounding::Annual
            .discount_factor_from_rate_with_day_count(0.05, 1.0, DayCount::ActAct)
            .is_ok());
    }

    #[test]
    fn test_zero_year_fraction() {
        for compounding in Compounding::all() {
            assert_relative_eq!(compounding.discount_factor_from_rate(0.05, 0.0).unwrap(), 1.0);
            assert!(matches!(
                compounding.rate_from_discount_factor(0.99, 0.0),
                Err(FincalError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_invalid_discount_factor() {
        for df in [0.0, -0.5, f64::NAN] {
            assert!(matches!(
                Compounding::Continuous.rate_from_discount_factor(df, 1.0),
                Err(FincalError::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_parse_and_display() {
        for compounding in Compounding::all() {
            assert_eq!(compounding.to_string().parse::<Compounding>().unwrap(), *compounding);
        }
        assert_eq!("continuous".parse::<Compounding>().unwrap(), Compounding::Continuous);
        assert_eq!("Simple".parse::<Compounding>().unwrap(), Compounding::Simple);
        assert!(matches!(
            "XYZ".parse::<Compounding>(),
            Err(FincalError::UnsupportedConvention { .. })
        ));
    }

    #[test]
    fn test_serde_tags() {
        assert_eq!(serde_json::to_string(&Compounding::Continuous).unwrap(), "\"CON\"");
        let parsed: Compounding = serde_json::from_str("\"SIM\"").unwrap();
        assert_eq!(parsed, Compounding::Simple);
    }
}
