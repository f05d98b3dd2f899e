//! VAT / GST on a single transaction amount.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{require_non_negative, to_percent};
use crate::error::TaxError;
use crate::models::{GstCategory, IndirectRates, IndirectTaxResult, Jurisdiction, RateBasis};
use crate::schedule::TaxSchedule;

/// Indirect tax on `amount` (exclusive of tax).
///
/// Flat-rate jurisdictions ignore `category`. For category-keyed rates
/// (India GST) the category's rate applies; with no category, or a category
/// the schedule does not rate, the default rate applies and the result's
/// basis is [`RateBasis::DefaultRate`].
///
/// # Errors
///
/// [`TaxError::NegativeAmount`] for a negative amount;
/// [`TaxError::AmountOutOfRange`] when the gross amount overflows;
/// [`TaxError::UnsupportedJurisdiction`] if the schedule has no indirect
/// rates for the jurisdiction.
pub fn calculate_indirect_tax(
    schedule: &TaxSchedule,
    amount: Decimal,
    jurisdiction: Jurisdiction,
    category: Option<GstCategory>,
) -> Result<IndirectTaxResult, TaxError> {
    let amount = require_non_negative("amount", amount)?;

    let (rate, basis) = match schedule.indirect_rates(jurisdiction)? {
        IndirectRates::Flat { rate } => (*rate, RateBasis::Flat),
        IndirectRates::ByCategory {
            rates,
            default_rate,
        } => match category.and_then(|c| rates.get(&c).map(|rate| (c, *rate))) {
            Some((category, rate)) => (rate, RateBasis::Category(category)),
            None => {
                debug!(%jurisdiction, ?category, %default_rate, "using default indirect rate");
                (*default_rate, RateBasis::DefaultRate)
            }
        },
    };

    let out_of_range = || TaxError::AmountOutOfRange {
        field: "amount",
        value: amount,
    };
    let tax_amount = amount.checked_mul(rate).ok_or_else(out_of_range)?;
    let gross_amount = amount.checked_add(tax_amount).ok_or_else(out_of_range)?;

    Ok(IndirectTaxResult {
        currency: jurisdiction.currency(),
        net_amount: amount,
        tax_amount,
        gross_amount,
        rate: to_percent(rate),
        basis,
    })
}
