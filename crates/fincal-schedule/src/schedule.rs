//! Schedule generation.
//!
//! A schedule is produced by stepping a [`Tenor`] from one bound toward the
//! other, rolling and then adjusting each visited date. The result is
//! ascending and duplicate free whichever direction the walk takes.
//!
//! # Boundaries
//!
//! - The bound the walk starts from is emitted only when `inclusive` is set.
//! - The far bound is emitted when `inclusive` is set and the unadjusted walk
//!   lands on it exactly.
//! - With `extend_last` exactly one extra point past the far bound is
//!   appended, stepping further when adjustment would pull it back onto the
//!   last emitted date.
//!
//! # Example
//!
//! ```rust
//! use fincal_core::calendars::RollConvention;
//! use fincal_core::types::Date;
//! use fincal_schedule::{ScheduleBuilder, Tenor};
//!
//! let schedule = ScheduleBuilder::new(
//!     Tenor::months(-3),
//!     Date::from_ymd(2024, 1, 31).unwrap(),
//!     Date::from_ymd(2025, 1, 31).unwrap(),
//! )
//! .backward(true)
//! .with_roll(RollConvention::EndOfMonth)
//! .generate()
//! .unwrap();
//!
//! assert_eq!(schedule.len(), 3);
//! assert_eq!(schedule[0], Date::from_ymd(2024, 4, 30).unwrap());
//! ```

use std::sync::Arc;

use log::{debug, trace};

use fincal_core::calendars::{BDayAdjust, BusinessCalendar, BusinessDayConvention, RollConvention};
use fincal_core::error::{FincalError, FincalResult};
use fincal_core::types::Date;

use crate::tenor::Tenor;

/// Configuration of a schedule walk.
///
/// Defaults: forward, unadjusted, no roll, not extended, not inclusive.
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    tenor: Tenor,
    from: Date,
    to: Date,
    step_backward: bool,
    bd_adjust: BDayAdjust,
    roll: RollConvention,
    extend_last: bool,
    inclusive: bool,
}

impl ScheduleBuilder {
    /// Creates a walk of `tenor` between `from` and `to`.
    pub fn new(tenor: Tenor, from: Date, to: Date) -> Self {
        Self {
            tenor,
            from,
            to,
            step_backward: false,
            bd_adjust: BDayAdjust::unadjusted(),
            roll: RollConvention::Unadjusted,
            extend_last: false,
            inclusive: false,
        }
    }

    /// Walks from `to` back toward `from`; the tenor must step backward.
    pub fn backward(mut self, step_backward: bool) -> Self {
        self.step_backward = step_backward;
        self
    }

    /// Sets the business day adjustment.
    pub fn with_adjust(mut self, bd_adjust: BDayAdjust) -> Self {
        self.bd_adjust = bd_adjust;
        self
    }

    /// Sets the roll convention.
    pub fn with_roll(mut self, roll: RollConvention) -> Self {
        self.roll = roll;
        self
    }

    /// Appends one extra point past the far bound, strictly after the last
    /// emitted date once adjusted.
    pub fn extend_last(mut self, extend_last: bool) -> Self {
        self.extend_last = extend_last;
        self
    }

    /// Includes the bounds (the far bound only on an exact landing).
    pub fn inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = inclusive;
        self
    }

    /// Checks the walk can run to completion.
    ///
    /// # Errors
    ///
    /// - `FincalError::InvalidTenor` for a zero tenor or one stepping against
    ///   the walk direction
    /// - `FincalError::NotImplemented` for the IMM roll
    /// - `FincalError::InvalidDate` if `from > to`
    pub fn validate(&self) -> FincalResult<()> {
        let code = self.tenor.to_string();
        if self.tenor.is_zero() {
            return Err(FincalError::invalid_tenor(code, "zero tenor cannot step a schedule"));
        }
        if self.tenor.is_backward() != self.step_backward {
            let reason = if self.step_backward {
                "backward schedule needs a backward tenor"
            } else {
                "forward schedule needs a forward tenor"
            };
            return Err(FincalError::invalid_tenor(code, reason));
        }
        self.roll.validate()?;
        if self.from > self.to {
            return Err(FincalError::invalid_date(format!(
                "schedule start {} is after end {}",
                self.from, self.to
            )));
        }
        Ok(())
    }

    /// Generates the schedule.
    ///
    /// Fails before producing any date if [`ScheduleBuilder::validate`]
    /// fails, or with `FincalError::InvalidTenor` if a step does not move
    /// strictly toward the far bound.
    pub fn generate(&self) -> FincalResult<Vec<Date>> {
        self.validate()?;

        let (start, end) = if self.step_backward {
            (self.to, self.from)
        } else {
            (self.from, self.to)
        };

        let roll = self.roll.effective_for(self.tenor.is_month_based(), start);
        if roll != self.roll {
            debug!(
                "Roll {} downgraded to {roll} for tenor {} anchored at {start}",
                self.roll, self.tenor
            );
        }

        let walk = Walk {
            tenor: &self.tenor,
            roll,
            backward: self.step_backward,
        };
        let adjust = |date: Date| self.bd_adjust.adjust(date);

        let mut dates = Vec::new();
        if self.inclusive {
            let adjusted = adjust(start);
            if !walk.ahead(adjusted, end) {
                dates.push(adjusted);
            }
        }

        let mut date_i = walk.step(start)?;
        while walk.ahead(end, date_i) {
            let adjusted = adjust(date_i);
            if !walk.ahead(end, adjusted) {
                break;
            }
            walk.push(&mut dates, adjusted, start);

            // Skip raw steps the adjustment has already passed
            let mut next = walk.step(date_i)?;
            while !walk.ahead(next, adjusted) {
                next = walk.step(next)?;
            }
            date_i = next;
        }

        if self.extend_last {
            // Step on until the adjusted point clears the last emitted date
            let floor = dates.last().copied().unwrap_or(start);
            let mut adjusted = adjust(date_i);
            while !walk.ahead(adjusted, floor) {
                date_i = walk.step(date_i)?;
                adjusted = adjust(date_i);
            }
            dates.push(adjusted);
        } else if self.inclusive && date_i == end {
            walk.push(&mut dates, adjust(date_i), start);
        }

        if self.step_backward {
            dates.reverse();
        }

        trace!(
            "Generated {} dates stepping {} from {} to {}",
            dates.len(),
            self.tenor,
            self.from,
            self.to
        );
        Ok(dates)
    }
}

/// Direction-aware stepping for one schedule walk.
struct Walk<'a> {
    tenor: &'a Tenor,
    roll: RollConvention,
    backward: bool,
}

impl Walk<'_> {
    /// Checks if `a` is strictly further along the walk than `b`.
    fn ahead(&self, a: Date, b: Date) -> bool {
        if self.backward {
            a < b
        } else {
            a > b
        }
    }

    /// One raw tenor step followed by the roll.
    fn step(&self, date: Date) -> FincalResult<Date> {
        let next = self.roll.roll(self.tenor.apply(date)?)?;
        if !self.ahead(next, date) {
            return Err(FincalError::invalid_tenor(
                self.tenor.to_string(),
                format!("does not progress from {date}"),
            ));
        }
        Ok(next)
    }

    /// Appends `date` if it is past the last emitted date (or `start`).
    fn push(&self, dates: &mut Vec<Date>, date: Date, start: Date) {
        let floor = dates.last().copied().unwrap_or(start);
        if self.ahead(date, floor) {
            dates.push(date);
        }
    }
}

impl Tenor {
    /// Generates a schedule stepping this tenor between `from` and `to`.
    ///
    /// See [`ScheduleBuilder`] for the boundary rules and errors.
    #[allow(clippy::too_many_arguments)]
    pub fn generate_series(
        &self,
        from: Date,
        to: Date,
        step_backward: bool,
        bd_adjust: &BDayAdjust,
        roll: RollConvention,
        extend_last: bool,
        inclusive: bool,
    ) -> FincalResult<Vec<Date>> {
        ScheduleBuilder::new(self.clone(), from, to)
            .backward(step_backward)
            .with_adjust(bd_adjust.clone())
            .with_roll(roll)
            .extend_last(extend_last)
            .inclusive(inclusive)
            .generate()
    }
}

/// Every business day in `[from, to]` on `calendar` (weekends only when
/// `None`).
///
/// # Errors
///
/// Returns `FincalError::InvalidDate` if `from > to`.
pub fn business_day_series(
    from: Date,
    to: Date,
    calendar: Option<Arc<BusinessCalendar>>,
) -> FincalResult<Vec<Date>> {
    let adjust = BDayAdjust::new(BusinessDayConvention::Following, calendar.clone());
    ScheduleBuilder::new(Tenor::bday(1, calendar), from, to)
        .with_adjust(adjust)
        .inclusive(true)
        .generate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn tenor(code: &str) -> Tenor {
        Tenor::parse(code).unwrap()
    }

    #[test]
    fn test_quarterly_backward_eom() {
        let dates = tenor("-3M")
            .generate_series(
                d(2024, 1, 31),
                d(2025, 1, 31),
                true,
                &BDayAdjust::unadjusted(),
                RollConvention::EndOfMonth,
                false,
                false,
            )
            .unwrap();
        assert_eq!(dates, vec![d(2024, 4, 30), d(2024, 7, 31), d(2024, 10, 31)]);
    }

    #[test]
    fn test_forward_excludes_bounds_by_default() {
        let dates = ScheduleBuilder::new(tenor("3M"), d(2024, 1, 15), d(2025, 1, 15))
            .generate()
            .unwrap();
        assert_eq!(dates, vec![d(2024, 4, 15), d(2024, 7, 15), d(2024, 10, 15)]);
    }

    #[test]
    fn test_inclusive_exact_landing() {
        let dates = ScheduleBuilder::new(tenor("6M"), d(2024, 1, 15), d(2025, 1, 15))
            .inclusive(true)
            .generate()
            .unwrap();
        assert_eq!(
            dates,
            vec![d(2024, 1, 15), d(2024, 7, 15), d(2025, 1, 15)]
        );
    }

    #[test]
    fn test_inclusive_near_miss_excluded() {
        // 5M steps do not land on the far bound
        let dates = ScheduleBuilder::new(tenor("5M"), d(2024, 1, 15), d(2025, 1, 15))
            .inclusive(true)
            .generate()
            .unwrap();
        assert_eq!(
            dates,
            vec![d(2024, 1, 15), d(2024, 6, 15), d(2024, 11, 15)]
        );
    }

    #[test]
    fn test_extend_last_appends_one_point() {
        let dates = ScheduleBuilder::new(tenor("5M"), d(2024, 1, 15), d(2025, 1, 15))
            .extend_last(true)
            .generate()
            .unwrap();
        assert_eq!(
            dates,
            vec![d(2024, 6, 15), d(2024, 11, 15), d(2025, 4, 15)]
        );

        // Exact landing: the far bound itself is the extra point
        let dates = ScheduleBuilder::new(tenor("6M"), d(2024, 1, 15), d(2025, 1, 15))
            .extend_last(true)
            .generate()
            .unwrap();
        assert_eq!(dates, vec![d(2024, 7, 15), d(2025, 1, 15)]);
    }

    #[test]
    fn test_extend_last_steps_past_collapsed_point() {
        // Saturday 11 Jan adjusts back onto Friday 10 Jan, already emitted
        let adjust = BDayAdjust::new(BusinessDayConvention::Preceding, None);
        let builder = ScheduleBuilder::new(tenor("1D"), d(2025, 1, 6), d(2025, 1, 11))
            .with_adjust(adjust);
        let plain = builder.clone().generate().unwrap();
        assert_eq!(
            plain,
            vec![d(2025, 1, 7), d(2025, 1, 8), d(2025, 1, 9), d(2025, 1, 10)]
        );

        let extended = builder.extend_last(true).generate().unwrap();
        assert_eq!(extended.len(), plain.len() + 1);
        assert_eq!(extended.last(), Some(&d(2025, 1, 13)));
    }

    #[test]
    fn test_extend_last_backward_steps_past_collapsed_point() {
        // Sunday 5 Jan adjusts forward onto Monday 6 Jan, already emitted
        let adjust = BDayAdjust::new(BusinessDayConvention::Following, None);
        let dates = ScheduleBuilder::new(tenor("-1D"), d(2025, 1, 5), d(2025, 1, 10))
            .backward(true)
            .with_adjust(adjust)
            .extend_last(true)
            .generate()
            .unwrap();
        assert_eq!(
            dates,
            vec![
                d(2025, 1, 3),
                d(2025, 1, 6),
                d(2025, 1, 7),
                d(2025, 1, 8),
                d(2025, 1, 9),
            ]
        );
    }

    #[test]
    fn test_adjustment_collapsing_steps() {
        // Daily steps over a weekend collapse onto Monday under Following
        let adjust = BDayAdjust::new(BusinessDayConvention::Following, None);
        let dates = ScheduleBuilder::new(tenor("1D"), d(2025, 1, 2), d(2025, 1, 9))
            .with_adjust(adjust)
            .generate()
            .unwrap();
        assert_eq!(
            dates,
            vec![d(2025, 1, 3), d(2025, 1, 6), d(2025, 1, 7), d(2025, 1, 8)]
        );
    }

    #[test]
    fn test_adjustment_past_far_bound_stops() {
        // Saturday 2025-01-11 adjusts onto the far bound Monday 2025-01-13
        let adjust = BDayAdjust::new(BusinessDayConvention::Following, None);
        let dates = ScheduleBuilder::new(tenor("1W"), d(2024, 12, 28), d(2025, 1, 13))
            .with_adjust(adjust)
            .generate()
            .unwrap();
        assert_eq!(dates, vec![d(2025, 1, 6)]);
    }

    #[test]
    fn test_eom_downgraded_for_weeks() {
        let dates = ScheduleBuilder::new(tenor("2W"), d(2024, 1, 31), d(2024, 3, 31))
            .with_roll(RollConvention::EndOfMonth)
            .generate()
            .unwrap();
        assert_eq!(dates[0], d(2024, 2, 14));
        assert_eq!(dates.len(), 4);
    }

    #[test]
    fn test_eom_downgraded_off_month_end() {
        let dates = ScheduleBuilder::new(tenor("1M"), d(2024, 1, 15), d(2024, 4, 30))
            .with_roll(RollConvention::EndOfMonth)
            .generate()
            .unwrap();
        assert_eq!(dates, vec![d(2024, 2, 15), d(2024, 3, 15), d(2024, 4, 15)]);
    }

    #[test]
    fn test_eom_forward() {
        let dates = ScheduleBuilder::new(tenor("1M"), d(2024, 1, 31), d(2024, 6, 30))
            .with_roll(RollConvention::EndOfMonth)
            .inclusive(true)
            .generate()
            .unwrap();
        assert_eq!(
            dates,
            vec![
                d(2024, 1, 31),
                d(2024, 2, 29),
                d(2024, 3, 31),
                d(2024, 4, 30),
                d(2024, 5, 31),
                d(2024, 6, 30),
            ]
        );
    }

    #[test]
    fn test_validation_errors() {
        let (from, to) = (d(2024, 1, 1), d(2025, 1, 1));

        let err = ScheduleBuilder::new(tenor("0M"), from, to).generate().unwrap_err();
        assert!(matches!(err, FincalError::InvalidTenor { .. }));

        let err = ScheduleBuilder::new(tenor("3M"), from, to)
            .backward(true)
            .generate()
            .unwrap_err();
        assert!(matches!(err, FincalError::InvalidTenor { .. }));

        let err = ScheduleBuilder::new(tenor("-3M"), from, to).generate().unwrap_err();
        assert!(matches!(err, FincalError::InvalidTenor { .. }));

        let err = ScheduleBuilder::new(tenor("3M"), from, to)
            .with_roll(RollConvention::Imm)
            .generate()
            .unwrap_err();
        assert!(matches!(err, FincalError::NotImplemented { .. }));

        let err = ScheduleBuilder::new(tenor("3M"), to, from).generate().unwrap_err();
        assert!(matches!(err, FincalError::InvalidDate { .. }));
    }

    #[test]
    fn test_non_progressing_tenor_rejected() {
        // 31-Jan + 1M - 1M = 29-Jan: steps backward
        let err = ScheduleBuilder::new(tenor("1M-1M"), d(2024, 1, 31), d(2024, 12, 31))
            .generate()
            .unwrap_err();
        match err {
            FincalError::InvalidTenor { code, reason } => {
                assert_eq!(code, "1M-1M");
                assert!(reason.contains("progress"));
            }
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn test_equal_bounds() {
        let date = d(2025, 1, 6);
        let dates = ScheduleBuilder::new(tenor("1D"), date, date).generate().unwrap();
        assert!(dates.is_empty());
        let dates = ScheduleBuilder::new(tenor("1D"), date, date)
            .inclusive(true)
            .generate()
            .unwrap();
        assert_eq!(dates, vec![date]);
    }

    #[test]
    fn test_business_day_series_weekends() {
        let dates = business_day_series(d(2025, 1, 4), d(2025, 1, 12), None).unwrap();
        assert_eq!(
            dates,
            vec![d(2025, 1, 6), d(2025, 1, 7), d(2025, 1, 8), d(2025, 1, 9), d(2025, 1, 10)]
        );
        assert!(business_day_series(d(2025, 1, 4), d(2025, 1, 5), None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_business_day_series_with_holiday() {
        let calendar = Arc::new(BusinessCalendar::new(
            "TEST",
            2025..=2025,
            vec![d(2025, 1, 1), d(2025, 1, 8)],
        ));
        let dates = business_day_series(d(2025, 1, 1), d(2025, 1, 10), Some(calendar)).unwrap();
        assert_eq!(
            dates,
            vec![d(2025, 1, 2), d(2025, 1, 3), d(2025, 1, 6), d(2025, 1, 7), d(2025, 1, 9), d(2025, 1, 10)]
        );
    }
}
