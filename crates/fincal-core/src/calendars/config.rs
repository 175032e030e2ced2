//! Calendar registry configuration.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FincalError, FincalResult};

/// Calendar registry configuration.
///
/// Fixed for the lifetime of a registry.
///
/// ```toml
/// start_year = 2000
/// end_year = 2060
/// holiday_file = "data/holidays.json"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// First year of the holiday window
    #[serde(default = "default_start_year")]
    pub start_year: i32,

    /// Last year of the holiday window (inclusive)
    #[serde(default = "default_end_year")]
    pub end_year: i32,

    /// Optional JSON file of static holiday lists, consulted before the
    /// rule-based calendars
    #[serde(default)]
    pub holiday_file: Option<String>,
}

fn default_start_year() -> i32 {
    2000
}

fn default_end_year() -> i32 {
    2060
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            end_year: default_end_year(),
            holiday_file: None,
        }
    }
}

impl RegistryConfig {
    /// Creates a configuration for the given holiday window.
    pub fn with_years(start_year: i32, end_year: i32) -> FincalResult<Self> {
        let config = Self {
            start_year,
            end_year,
            holiday_file: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> FincalResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| FincalError::config(format!("invalid registry config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> FincalResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FincalError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Checks the year window.
    pub fn validate(&self) -> FincalResult<()> {
        if self.start_year > self.end_year {
            return Err(FincalError::config(format!(
                "start_year {} is after end_year {}",
                self.start_year, self.end_year
            )));
        }
        Ok(())
    }

    /// Returns the holiday year window.
    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }
}
