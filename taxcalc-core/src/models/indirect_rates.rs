use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ParseCodeError, ScheduleError};

/// Goods and services categories used by category-keyed GST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GstCategory {
    Essential,
    Basic,
    Standard,
    Luxury,
    Sin,
}

impl GstCategory {
    pub fn all() -> &'static [GstCategory] {
        &[
            Self::Essential,
            Self::Basic,
            Self::Standard,
            Self::Luxury,
            Self::Sin,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Luxury => "luxury",
            Self::Sin => "sin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "essential" => Some(Self::Essential),
            "basic" => Some(Self::Basic),
            "standard" => Some(Self::Standard),
            "luxury" => Some(Self::Luxury),
            "sin" => Some(Self::Sin),
            _ => None,
        }
    }
}

impl fmt::Display for GstCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GstCategory {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseCodeError::new("GST category", s))
    }
}

/// How a jurisdiction rates a single transaction.
///
/// Rates are fractions (`0.20` for 20%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndirectRates {
    /// One rate regardless of category.
    Flat { rate: Decimal },
    /// Category-keyed rates. `default_rate` applies when the caller gives no
    /// category, or the category has no entry.
    ByCategory {
        rates: BTreeMap<GstCategory, Decimal>,
        default_rate: Decimal,
    },
}

impl IndirectRates {
    pub fn flat(rate: Decimal) -> Result<Self, ScheduleError> {
        check_rate(rate)?;
        Ok(Self::Flat { rate })
    }

    pub fn by_category(
        rates: BTreeMap<GstCategory, Decimal>,
        default_rate: Decimal,
    ) -> Result<Self, ScheduleError> {
        check_rate(default_rate)?;
        for rate in rates.values() {
            check_rate(*rate)?;
        }
        Ok(Self::ByCategory {
            rates,
            default_rate,
        })
    }
}

pub(crate) fn check_rate(rate: Decimal) -> Result<(), ScheduleError> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(ScheduleError::InvalidRate(rate));
    }
    Ok(())
}
