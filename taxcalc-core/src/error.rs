use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{FilingStatus, Jurisdiction};

/// Errors raised while computing a tax figure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxError {
    /// Income, amount or profit below zero. Losses are not a supported input.
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// The result of a calculation on this input does not fit in a `Decimal`.
    #[error("{field} {value} is too large to calculate tax on")]
    AmountOutOfRange { field: &'static str, value: Decimal },

    /// The schedule carries no rates of this kind for the jurisdiction.
    #[error("no {kind} rates for {jurisdiction} in tax year {tax_year}")]
    UnsupportedJurisdiction {
        jurisdiction: Jurisdiction,
        kind: &'static str,
        tax_year: i32,
    },

    /// The jurisdiction has per-status tables but none for this status.
    #[error("no {jurisdiction} income tax table for filing status {status} in tax year {tax_year}")]
    FilingStatusNotCovered {
        jurisdiction: Jurisdiction,
        status: FilingStatus,
        tax_year: i32,
    },

    /// The jurisdiction taxes by filing status and none was given.
    #[error("a filing status is required for {0} income tax")]
    FilingStatusRequired(Jurisdiction),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Errors raised while building or looking up rate schedules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("no tax brackets provided")]
    EmptyBracketTable,

    #[error("invalid bracket table at index {index}: {reason}")]
    InvalidBracketTable { index: usize, reason: String },

    #[error("rate must be between 0 and 1, got {0}")]
    InvalidRate(Decimal),

    #[error("invalid tax year config: {0}")]
    InvalidYearConfig(String),

    #[error("invalid corporate rate tiers: {0}")]
    InvalidCorporateTiers(String),

    #[error("duplicate income tax table for {0}")]
    DuplicateIncomeTable(String),

    /// A jurisdiction was given both a uniform table and per-status tables.
    #[error("{0} has both a uniform income tax table and per-filing-status tables")]
    ConflictingIncomeTables(Jurisdiction),

    #[error("tax year {requested} is not available; available: {available:?}")]
    TaxYearNotAvailable { requested: i32, available: Vec<i32> },

    /// Failure reported by a [`crate::schedule::ScheduleSource`].
    #[error("schedule source error: {0}")]
    Source(String),
}

/// An enumerated code (jurisdiction, filing status, category) that is not
/// one of the recognised values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseCodeError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseCodeError {
    pub(crate) fn new(
        kind: &'static str,
        value: &str,
    ) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
