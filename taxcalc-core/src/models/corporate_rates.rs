use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::indirect_rates::check_rate;

/// A profit band for corporate tax. `max_profit` is inclusive; `None` means
/// no upper limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateRateTier {
    pub max_profit: Option<Decimal>,
    pub rate: Decimal,
}

/// Step-function corporate rates.
///
/// The whole profit is taxed at the rate of the first tier whose limit it
/// does not exceed. Unlike [`crate::BracketTable`] the tiers are not slices
/// of income: crossing a limit changes the rate for every unit of profit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorporateRates {
    tiers: Vec<CorporateRateTier>,
}

impl CorporateRates {
    /// # Errors
    ///
    /// [`ScheduleError::InvalidCorporateTiers`] unless the tiers are non-empty,
    /// strictly ascending by limit and end with an open tier;
    /// [`ScheduleError::InvalidRate`] for a rate outside `[0, 1]`.
    pub fn new(tiers: Vec<CorporateRateTier>) -> Result<Self, ScheduleError> {
        let Some(last) = tiers.last() else {
            return Err(ScheduleError::InvalidCorporateTiers("no tiers provided".to_string()));
        };
        if last.max_profit.is_some() {
            return Err(ScheduleError::InvalidCorporateTiers(
                "last tier must have no profit limit".to_string(),
            ));
        }

        let mut previous: Option<Decimal> = None;
        for tier in &tiers[..tiers.len() - 1] {
            let Some(limit) = tier.max_profit else {
                return Err(ScheduleError::InvalidCorporateTiers(
                    "only the last tier may be unlimited".to_string(),
                ));
            };
            if previous.is_some_and(|p| limit <= p) {
                return Err(ScheduleError::InvalidCorporateTiers(format!(
                    "limit {limit} is not above the previous tier"
                )));
            }
            previous = Some(limit);
        }
        for tier in &tiers {
            check_rate(tier.rate)?;
        }

        Ok(Self { tiers })
    }

    /// A single rate for any profit.
    pub fn flat(rate: Decimal) -> Result<Self, ScheduleError> {
        Self::new(vec![CorporateRateTier {
            max_profit: None,
            rate,
        }])
    }

    pub fn tiers(&self) -> &[CorporateRateTier] {
        &self.tiers
    }

    /// Rate (as a fraction) applying to the whole of `profit`.
    pub fn rate_for(
        &self,
        profit: Decimal,
    ) -> Decimal {
        self.tiers
            .iter()
            .find(|t| t.max_profit.is_none_or(|limit| profit <= limit))
            .or(self.tiers.last())
            .map_or(Decimal::ZERO, |t| t.rate)
    }
}
