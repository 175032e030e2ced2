//! Calendar registry: resolves identifiers to cached business calendars.
//!
//! # Design
//!
//! - Calendars are keyed by the exact identifier string; `"US:NY"` and `"US"`
//!   are cached independently
//! - `+` unions resolve (and cache) every operand, then cache the union
//! - Entries are created lazily and never invalidated
//!
//! # Thread Safety
//!
//! Cached lookups take a shared read lock. First-time resolution is
//! serialised by a build mutex, so an identifier is never computed twice
//! concurrently.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use log::{debug, trace};
use parking_lot::{Mutex, RwLock};

use super::business::BusinessCalendar;
use super::config::RegistryConfig;
use super::id::CalendarSpec;
use super::sources::{HolidaySource, RuleHolidaySource, StaticHolidaySource};
use crate::error::{FincalError, FincalResult};

static GLOBAL_REGISTRY: OnceLock<CalendarRegistry> = OnceLock::new();

/// Cache of resolved business calendars.
///
/// ```rust
/// use fincal_core::calendars::CalendarRegistry;
/// use fincal_core::types::Date;
///
/// let registry = CalendarRegistry::new();
/// let us = registry.resolve("US").unwrap();
/// assert!(!us.is_business_day(Date::from_ymd(2025, 7, 4).unwrap()));
///
/// let again = registry.resolve("US").unwrap();
/// assert!(std::sync::Arc::ptr_eq(&us, &again));
/// ```
pub struct CalendarRegistry {
    config: RegistryConfig,
    source: Box<dyn HolidaySource>,
    calendars: RwLock<HashMap<String, Arc<BusinessCalendar>>>,
    build_lock: Mutex<()>,
}

impl fmt::Debug for CalendarRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarRegistry")
            .field("config", &self.config)
            .field("cached", &self.keys())
            .finish()
    }
}

impl Default for CalendarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarRegistry {
    /// Creates a registry using the rule-based holiday source and the
    /// default year window.
    pub fn new() -> Self {
        Self::build(RegistryConfig::default(), Box::new(RuleHolidaySource::new()))
    }

    /// Creates a registry over a custom holiday source with the default
    /// year window.
    pub fn with_source<S: HolidaySource + 'static>(source: S) -> Self {
        Self::build(RegistryConfig::default(), Box::new(source))
    }

    /// Creates a registry using the rule-based holiday source and `config`.
    ///
    /// When `config.holiday_file` is set, its static lists take precedence
    /// over the rules.
    ///
    /// # Errors
    ///
    /// Returns `FincalError::Config` for an invalid window or an unreadable
    /// holiday file.
    pub fn with_config(config: RegistryConfig) -> FincalResult<Self> {
        Self::with_source_and_config(RuleHolidaySource::new(), config)
    }

    /// Creates a registry over a custom holiday source and `config`.
    pub fn with_source_and_config<S: HolidaySource + 'static>(
        source: S,
        config: RegistryConfig,
    ) -> FincalResult<Self> {
        config.validate()?;

        let source: Box<dyn HolidaySource> = match &config.holiday_file {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| FincalError::config(format!("cannot read {path}: {e}")))?;
                let static_source = StaticHolidaySource::from_json(&content)?;
                debug!(
                    "Loaded static holidays for {:?} from {path}",
                    static_source.codes()
                );
                Box::new(static_source.with_fallback(source))
            }
            None => Box::new(source),
        };
        Ok(Self::build(config, source))
    }

    fn build(config: RegistryConfig, source: Box<dyn HolidaySource>) -> Self {
        Self {
            config,
            source,
            calendars: RwLock::new(HashMap::new()),
            build_lock: Mutex::new(()),
        }
    }

    /// Returns the process-wide registry (rule source, default window).
    pub fn global() -> &'static CalendarRegistry {
        GLOBAL_REGISTRY.get_or_init(CalendarRegistry::new)
    }

    /// Returns the registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Resolves an identifier to its business calendar.
    ///
    /// # Errors
    ///
    /// Returns `FincalError::InvalidCalendar` for malformed identifiers and
    /// codes unknown to the holiday source.
    pub fn resolve<I: AsRef<str> + ?Sized>(&self, id: &I) -> FincalResult<Arc<BusinessCalendar>> {
        let id = id.as_ref();
        if let Some(calendar) = self.cached(id) {
            trace!("Calendar cache hit: {id}");
            return Ok(calendar);
        }

        let _guard = self.build_lock.lock();
        self.resolve_locked(id)
    }

    /// Resolves an optional identifier; `None` stays `None`.
    pub fn resolve_optional(&self, id: Option<&str>) -> FincalResult<Option<Arc<BusinessCalendar>>> {
        id.map(|id| self.resolve(id)).transpose()
    }

    /// Checks if an identifier has been resolved and cached.
    pub fn contains<I: AsRef<str> + ?Sized>(&self, id: &I) -> bool {
        self.calendars.read().contains_key(id.as_ref())
    }

    /// Returns the cached identifiers, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.calendars.read().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Returns the number of cached calendars.
    pub fn len(&self) -> usize {
        self.calendars.read().len()
    }

    /// Checks if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.calendars.read().is_empty()
    }

    fn cached(&self, id: &str) -> Option<Arc<BusinessCalendar>> {
        self.calendars.read().get(id).map(Arc::clone)
    }

    /// Resolution with the build lock held.
    fn resolve_locked(&self, id: &str) -> FincalResult<Arc<BusinessCalendar>> {
        if let Some(calendar) = self.cached(id) {
            return Ok(calendar);
        }

        let years = self.config.years();
        let calendar = match CalendarSpec::parse(id)? {
            CalendarSpec::Single {
                country,
                subdivision,
            } => {
                let holidays =
                    self.source
                        .holidays(&country, subdivision.as_deref(), years.clone())?;
                BusinessCalendar::new(id, years, holidays)
            }
            CalendarSpec::Union(operands) => {
                let parts = operands
                    .iter()
                    .map(|operand| self.resolve_locked(operand))
                    .collect::<FincalResult<Vec<_>>>()?;
                BusinessCalendar::union(id, &parts)
            }
        };

        debug!(
            "Built calendar {id} with {} holidays over {:?}",
            calendar.holidays().len(),
            calendar.years()
        );

        let calendar = Arc::new(calendar);
        let mut calendars = self.calendars.write();
        Ok(Arc::clone(
            calendars.entry(id.to_string()).or_insert(calendar),
        ))
    }
}
