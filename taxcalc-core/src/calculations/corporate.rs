use rust_decimal::Decimal;

use crate::calculations::common::{require_non_negative, to_percent};
use crate::error::TaxError;
use crate::models::{CorporateTaxResult, Jurisdiction};
use crate::schedule::TaxSchedule;

/// Corporate tax on `profit`.
///
/// The whole profit is taxed at a single rate chosen from the jurisdiction's
/// tiers; see [`crate::CorporateRates::rate_for`].
///
/// # Errors
///
/// [`TaxError::NegativeAmount`] for a negative profit;
/// [`TaxError::UnsupportedJurisdiction`] if the schedule has no corporate
/// rates for the jurisdiction.
pub fn calculate_corporate_tax(
    schedule: &TaxSchedule,
    profit: Decimal,
    jurisdiction: Jurisdiction,
) -> Result<CorporateTaxResult, TaxError> {
    let profit = require_non_negative("profit", profit)?;
    let rate = schedule.corporate_rates(jurisdiction)?.rate_for(profit);
    let tax = profit * rate;

    Ok(CorporateTaxResult {
        currency: jurisdiction.currency(),
        profit,
        tax,
        rate: to_percent(rate),
        net_profit: profit - tax,
    })
}
