//! Business day adjustment conventions.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::business::BusinessCalendar;
use crate::error::FincalError;
use crate::types::Date;

/// Business day adjustment conventions.
///
/// These conventions specify how to adjust a date that falls
/// on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// No adjustment - use the date as-is even if not a business day.
    #[default]
    Unadjusted,

    /// Move to the following business day.
    Following,

    /// Move to the preceding business day.
    Preceding,

    /// Move to the following business day, unless it crosses a month boundary,
    /// in which case move to the preceding business day.
    ModifiedFollowing,
}

impl BusinessDayConvention {
    /// Adjusts a date on `calendar`, or on weekends only when `None`.
    pub fn adjust(self, date: Date, calendar: Option<&BusinessCalendar>) -> Date {
        let calendar = calendar.unwrap_or_else(|| BusinessCalendar::weekends_only_ref());
        if self == BusinessDayConvention::Unadjusted || calendar.is_business_day(date) {
            return date;
        }

        match self {
            BusinessDayConvention::Unadjusted => date,
            BusinessDayConvention::Following => calendar.next_business_day(date),
            BusinessDayConvention::Preceding => calendar.previous_business_day(date),
            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = calendar.next_business_day(date);
                if adjusted.month() == date.month() {
                    adjusted
                } else {
                    calendar.previous_business_day(date)
                }
            }
        }
    }

    /// Returns the short tag (`U`, `F`, `P`, `MF`).
    pub fn tag(self) -> &'static str {
        match self {
            BusinessDayConvention::Unadjusted => "U",
            BusinessDayConvention::Following => "F",
            BusinessDayConvention::Preceding => "P",
            BusinessDayConvention::ModifiedFollowing => "MF",
        }
    }
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BusinessDayConvention {
    type Err = FincalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "U" | "NONE" | "UNADJUSTED" => Ok(BusinessDayConvention::Unadjusted),
            "F" | "FOLLOWING" => Ok(BusinessDayConvention::Following),
            "P" | "PRECEDING" => Ok(BusinessDayConvention::Preceding),
            "MF" | "MODFOLLOWING" | "MODIFIEDFOLLOWING" => {
                Ok(BusinessDayConvention::ModifiedFollowing)
            }
            _ => Err(FincalError::unsupported(s, "business day adjustment")),
        }
    }
}

/// A business day convention bound to a calendar.
///
/// Stateless; cloning shares the calendar.
///
/// ```rust
/// use fincal_core::calendars::{BDayAdjust, BusinessDayConvention};
/// use fincal_core::types::Date;
///
/// // 2025-05-31 is a Saturday; Following would leave May
/// let adjust = BDayAdjust::new(BusinessDayConvention::ModifiedFollowing, None);
/// let date = Date::from_ymd(2025, 5, 31).unwrap();
/// assert_eq!(adjust.adjust(date), Date::from_ymd(2025, 5, 30).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BDayAdjust {
    convention: BusinessDayConvention,
    calendar: Option<Arc<BusinessCalendar>>,
}

impl BDayAdjust {
    /// Creates an adjuster; `None` means weekends only.
    pub fn new(convention: BusinessDayConvention, calendar: Option<Arc<BusinessCalendar>>) -> Self {
        Self {
            convention,
            calendar,
        }
    }

    /// The no-op adjuster.
    pub fn unadjusted() -> Self {
        Self::default()
    }

    /// Following on `calendar`.
    pub fn following(calendar: Arc<BusinessCalendar>) -> Self {
        Self::new(BusinessDayConvention::Following, Some(calendar))
    }

    /// Preceding on `calendar`.
    pub fn preceding(calendar: Arc<BusinessCalendar>) -> Self {
        Self::new(BusinessDayConvention::Preceding, Some(calendar))
    }

    /// Modified Following on `calendar`.
    pub fn modified_following(calendar: Arc<BusinessCalendar>) -> Self {
        Self::new(BusinessDayConvention::ModifiedFollowing, Some(calendar))
    }

    /// Adjusts a date.
    pub fn adjust(&self, date: Date) -> Date {
        self.convention.adjust(date, self.calendar.as_deref())
    }

    /// Returns the convention.
    pub fn convention(&self) -> BusinessDayConvention {
        self.convention
    }

    /// Returns the calendar, if any.
    pub fn calendar(&self) -> Option<&Arc<BusinessCalendar>> {
        self.calendar.as_ref()
    }

    /// Checks if adjustment is the identity.
    pub fn is_unadjusted(&self) -> bool {
        self.convention == BusinessDayConvention::Unadjusted
    }
}

impl PartialEq for BDayAdjust {
    fn eq(&self, other: &Self) -> bool {
        self.convention == other.convention
            && self.calendar.as_ref().map(|c| c.id()) == other.calendar.as_ref().map(|c| c.id())
    }
}

impl fmt::Display for BDayAdjust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.calendar {
            Some(calendar) => write!(f, "{} ({})", self.convention, calendar.id()),
            None => write!(f, "{}", self.convention),
        }
    }
}
