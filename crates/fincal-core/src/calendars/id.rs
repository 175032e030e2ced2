//! Calendar identifiers.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FincalError, FincalResult};

/// Identifier of a business-day calendar.
///
/// A country or exchange code (`US`, `XNYS`), optionally with a subdivision
/// (`US:NY`), or a union of such codes joined by `+` (`US+TARGET`). Equality
/// is by exact string value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarId(Cow<'static, str>);

impl CalendarId {
    /// US federal holidays.
    pub const US: CalendarId = CalendarId(Cow::Borrowed("US"));
    /// New York Stock Exchange.
    pub const XNYS: CalendarId = CalendarId(Cow::Borrowed("XNYS"));
    /// New York State.
    pub const US_NY: CalendarId = CalendarId(Cow::Borrowed("US:NY"));
    /// England and Wales.
    pub const GB: CalendarId = CalendarId(Cow::Borrowed("GB"));
    /// TARGET2.
    pub const TARGET: CalendarId = CalendarId(Cow::Borrowed("TARGET"));
    /// Japan.
    pub const JP: CalendarId = CalendarId(Cow::Borrowed("JP"));
    /// China.
    ///
    /// The rule-based source has no rules for this code: it resolves only
    /// through a registry whose source includes a
    /// [`StaticHolidaySource`](crate::calendars::StaticHolidaySource) list
    /// for it. [`CalendarRegistry::new`](crate::calendars::CalendarRegistry::new)
    /// rejects it with `FincalError::InvalidCalendar`.
    pub const CN: CalendarId = CalendarId(Cow::Borrowed("CN"));
    /// Hong Kong.
    ///
    /// Like [`CalendarId::CN`], resolves only through a
    /// [`StaticHolidaySource`](crate::calendars::StaticHolidaySource).
    pub const HK: CalendarId = CalendarId(Cow::Borrowed("HK"));

    /// Creates an identifier from any string. Validation happens on
    /// [`CalendarId::spec`] or resolution.
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Returns the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks if the identifier is a `+` union.
    pub fn is_union(&self) -> bool {
        self.0.contains('+')
    }

    /// Parses the identifier into its structure.
    pub fn spec(&self) -> FincalResult<CalendarSpec> {
        CalendarSpec::parse(&self.0)
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CalendarId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CalendarId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CalendarId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl FromStr for CalendarId {
    type Err = FincalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CalendarSpec::parse(s)?;
        Ok(Self::new(s))
    }
}

/// Parsed structure of a calendar identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarSpec {
    /// A single country or exchange calendar.
    Single {
        /// Country or exchange code.
        country: String,
        /// Optional subdivision code.
        subdivision: Option<String>,
    },
    /// Union of the operand identifiers, in order of appearance.
    Union(Vec<String>),
}

impl CalendarSpec {
    /// Parses an identifier.
    ///
    /// # Errors
    ///
    /// Returns `FincalError::InvalidCalendar` for empty identifiers, empty
    /// union operands (`"US+"`) and empty country or subdivision parts
    /// (`":NY"`, `"US:"`).
    pub fn parse(id: &str) -> FincalResult<Self> {
        if id.trim().is_empty() {
            return Err(FincalError::invalid_calendar(id, "empty calendar identifier"));
        }

        if id.contains('+') {
            let operands: Vec<String> = id.split('+').map(str::to_string).collect();
            if operands.iter().any(|op| op.trim().is_empty()) {
                return Err(FincalError::invalid_calendar(id, "empty union operand"));
            }
            return Ok(CalendarSpec::Union(operands));
        }

        match id.split_once(':') {
            Some((country, subdivision)) => {
                if country.trim().is_empty() || subdivision.trim().is_empty() {
                    return Err(FincalError::invalid_calendar(
                        id,
                        "expected COUNTRY:SUBDIVISION",
                    ));
                }
                Ok(CalendarSpec::Single {
                    country: country.to_string(),
                    subdivision: Some(subdivision.to_string()),
                })
            }
            None => Ok(CalendarSpec::Single {
                country: id.to_string(),
                subdivision: None,
            }),
        }
    }
}
