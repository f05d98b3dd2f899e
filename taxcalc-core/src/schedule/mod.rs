//! Per-tax-year rule sets and the registry that serves them.

mod registry;
mod tax_schedule;

pub use registry::{ScheduleRegistry, ScheduleSource};
pub use tax_schedule::{IncomeTaxTables, TaxSchedule, TaxScheduleBuilder};
