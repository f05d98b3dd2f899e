use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ParseCodeError;
use crate::models::Currency;

/// A national tax regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Jurisdiction {
    Us,
    Uk,
    India,
    Nigeria,
}

impl Jurisdiction {
    pub fn all() -> &'static [Jurisdiction] {
        &[Self::Us, Self::Uk, Self::India, Self::Nigeria]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Uk => "UK",
            Self::India => "IN",
            Self::Nigeria => "NG",
        }
    }

    /// Parses a jurisdiction code. Accepts the canonical codes as well as
    /// `USA`, `GB`, `INDIA` and `NIGERIA`, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "US" | "USA" => Some(Self::Us),
            "UK" | "GB" => Some(Self::Uk),
            "IN" | "INDIA" => Some(Self::India),
            "NG" | "NIGERIA" => Some(Self::Nigeria),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Us => "United States",
            Self::Uk => "United Kingdom",
            Self::India => "India",
            Self::Nigeria => "Nigeria",
        }
    }

    pub fn currency(&self) -> Currency {
        match self {
            Self::Us => Currency::Usd,
            Self::Uk => Currency::Gbp,
            Self::India => Currency::Inr,
            Self::Nigeria => Currency::Ngn,
        }
    }

    /// The fiscal period that `tax_year` refers to in this jurisdiction.
    ///
    /// | Jurisdiction | Period |
    /// |--------------|--------|
    /// | US, Nigeria  | 1 January `year` – 31 December `year` |
    /// | UK           | 6 April `year` – 5 April `year + 1` |
    /// | India        | 1 April `year` – 31 March `year + 1` |
    ///
    /// Returns `None` only for years chrono cannot represent.
    pub fn tax_period(
        &self,
        tax_year: i32,
    ) -> Option<TaxPeriod> {
        let (start, end) = match self {
            Self::Us | Self::Nigeria => (
                NaiveDate::from_ymd_opt(tax_year, 1, 1)?,
                NaiveDate::from_ymd_opt(tax_year, 12, 31)?,
            ),
            Self::Uk => (
                NaiveDate::from_ymd_opt(tax_year, 4, 6)?,
                NaiveDate::from_ymd_opt(tax_year.checked_add(1)?, 4, 5)?,
            ),
            Self::India => (
                NaiveDate::from_ymd_opt(tax_year, 4, 1)?,
                NaiveDate::from_ymd_opt(tax_year.checked_add(1)?, 3, 31)?,
            ),
        };
        Some(TaxPeriod { start, end })
    }

    /// The tax year whose period contains `date`.
    pub fn tax_year_for(
        &self,
        date: NaiveDate,
    ) -> i32 {
        let year = date.year();
        let fiscal_start = match self {
            Self::Us | Self::Nigeria => return year,
            Self::Uk => (4, 6),
            Self::India => (4, 1),
        };
        if (date.month(), date.day()) >= fiscal_start {
            year
        } else {
            year - 1
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Jurisdiction {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseCodeError::new("jurisdiction", s))
    }
}

/// Inclusive date range covered by one tax year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TaxPeriod {
    pub fn contains(
        &self,
        date: NaiveDate,
    ) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for TaxPeriod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
