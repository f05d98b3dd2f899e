pub mod calculations;
pub mod error;
pub mod models;
pub mod schedule;

pub use calculations::TaxCalculator;
pub use error::{ParseCodeError, ScheduleError, TaxError};
pub use models::*;
pub use schedule::{
    IncomeTaxTables, ScheduleRegistry, ScheduleSource, TaxSchedule, TaxScheduleBuilder,
};
