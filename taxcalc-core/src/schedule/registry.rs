use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, warn};

use super::TaxSchedule;
use crate::error::ScheduleError;

/// Anything that can produce a complete [`TaxSchedule`].
///
/// Each data backend exports one implementation; the registry does not care
/// whether the tables were compiled in, read from disk or built in a test.
pub trait ScheduleSource: Send + Sync {
    /// Short human-readable origin, used in log lines (e.g. `"bundled 2026"`).
    fn describe(&self) -> String;

    /// Build the schedule. Errors are returned to the caller unchanged.
    fn load(&self) -> Result<TaxSchedule, ScheduleError>;
}

/// Registry of [`TaxSchedule`]s, keyed by tax year.
///
/// Typical lifetime:
/// 1. Create with `ScheduleRegistry::new()`.
/// 2. Call `register` or `load_from` once per known year.
/// 3. Call `get` whenever a calculation for a year is needed.
///
/// Schedules are shared through [`Arc`] and never modified after
/// registration; a new schedule for an existing year replaces the old one
/// as a whole.
#[derive(Debug, Default)]
pub struct ScheduleRegistry {
    schedules: BTreeMap<i32, Arc<TaxSchedule>>,
}

impl ScheduleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schedule under its own tax year.
    pub fn register(
        &mut self,
        schedule: TaxSchedule,
    ) {
        let year = schedule.tax_year();
        if self.schedules.insert(year, Arc::new(schedule)).is_some() {
            warn!(tax_year = year, "replaced previously registered tax schedule");
        } else {
            info!(tax_year = year, "registered tax schedule");
        }
    }

    /// Load a schedule from `source` and register it, returning its tax year.
    ///
    /// # Errors
    ///
    /// Any error the source itself returns; the registry is left untouched.
    pub fn load_from(
        &mut self,
        source: &dyn ScheduleSource,
    ) -> Result<i32, ScheduleError> {
        let schedule = source.load()?;
        let year = schedule.tax_year();
        info!(source = %source.describe(), tax_year = year, "loaded tax schedule");
        self.register(schedule);
        Ok(year)
    }

    /// Every registered tax year, ascending.
    pub fn available_years(&self) -> Vec<i32> {
        self.schedules.keys().copied().collect()
    }

    /// # Errors
    ///
    /// [`ScheduleError::TaxYearNotAvailable`] naming the requested year and
    /// the years that are registered.
    pub fn get(
        &self,
        tax_year: i32,
    ) -> Result<Arc<TaxSchedule>, ScheduleError> {
        self.schedules
            .get(&tax_year)
            .cloned()
            .ok_or_else(|| ScheduleError::TaxYearNotAvailable {
                requested: tax_year,
                available: self.available_years(),
            })
    }

    /// The schedule for the most recent registered year.
    pub fn latest(&self) -> Option<Arc<TaxSchedule>> {
        self.schedules.values().next_back().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}
