use rust_decimal::Decimal;

use crate::calculations::progressive::evaluate;
use crate::error::TaxError;
use crate::models::{Currency, Jurisdiction, TaxCalculationResult};
use crate::schedule::TaxSchedule;

/// Nigerian personal income tax on `income`, in NGN.
///
/// # Errors
///
/// [`TaxError::NegativeAmount`] for negative income;
/// [`TaxError::UnsupportedJurisdiction`] if the schedule has no Nigeria table.
pub fn calculate_nigeria_tax(
    schedule: &TaxSchedule,
    income: Decimal,
) -> Result<TaxCalculationResult, TaxError> {
    let table = schedule.income_brackets(Jurisdiction::Nigeria, None)?;
    evaluate(income, table, Currency::Ngn)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::jurisdictions::test_schedule;

    #[test]
    fn income_below_threshold_is_untaxed() {
        let result = calculate_nigeria_tax(&test_schedule(), dec!(800000)).unwrap();

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.marginal_rate, dec!(0));
    }

    #[test]
    fn income_across_two_bands() {
        let result = calculate_nigeria_tax(&test_schedule(), dec!(5000000)).unwrap();

        // 2,200,000 × 15% + 2,000,000 × 18%
        assert_eq!(result.total_tax, dec!(690000));
        assert_eq!(result.marginal_rate, dec!(18));
        assert_eq!(result.breakdown[1].range, "₦800,000 - ₦3,000,000");
    }
}
