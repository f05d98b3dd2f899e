//! Tax calculations over a [`crate::TaxSchedule`].
//!
//! [`progressive`] holds the bracket evaluator every income tax adapter
//! builds on; [`jurisdictions`] adds the per-country rules; [`indirect`] and
//! [`corporate`] cover VAT/GST and company profits.

pub mod calculator;
pub mod common;
pub mod corporate;
pub mod indirect;
pub mod jurisdictions;
pub mod progressive;

pub use calculator::TaxCalculator;
pub use corporate::calculate_corporate_tax;
pub use indirect::calculate_indirect_tax;
pub use jurisdictions::{
    calculate_income_tax, calculate_india_tax, calculate_nigeria_tax, calculate_uk_tax,
    calculate_usa_tax, derive_tapered_brackets,
};
pub use progressive::evaluate;
