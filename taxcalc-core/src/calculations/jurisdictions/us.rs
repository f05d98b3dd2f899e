use rust_decimal::Decimal;

use crate::calculations::progressive::evaluate;
use crate::error::TaxError;
use crate::models::{Currency, FilingStatus, Jurisdiction, TaxCalculationResult};
use crate::schedule::TaxSchedule;

/// US federal income tax on `income` for `filing_status`, in USD.
///
/// Each filing status has its own bracket table; there are no adjustments on
/// top of the progressive evaluation.
///
/// # Errors
///
/// * [`TaxError::NegativeAmount`] for negative income.
/// * [`TaxError::UnsupportedJurisdiction`] or
///   [`TaxError::FilingStatusNotCovered`] if the schedule lacks the table.
pub fn calculate_usa_tax(
    schedule: &TaxSchedule,
    income: Decimal,
    filing_status: FilingStatus,
) -> Result<TaxCalculationResult, TaxError> {
    let table = schedule.income_brackets(Jurisdiction::Us, Some(filing_status))?;
    evaluate(income, table, Currency::Usd)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::jurisdictions::test_schedule;

    #[test]
    fn single_filer_at_100k() {
        let result =
            calculate_usa_tax(&test_schedule(), dec!(100000), FilingStatus::Single).unwrap();

        assert_eq!(result.total_tax, dec!(16712));
        assert_eq!(result.marginal_rate, dec!(22));
        assert_eq!(result.currency, Currency::Usd);
    }

    #[test]
    fn joint_filers_use_their_own_table() {
        let result = calculate_usa_tax(
            &test_schedule(),
            dec!(100000),
            FilingStatus::MarriedFilingJointly,
        )
        .unwrap();

        // 24,800 × 10% + 75,200 × 12%
        assert_eq!(result.total_tax, dec!(11504));
        assert_eq!(result.marginal_rate, dec!(12));
    }

    #[test]
    fn status_without_table_is_reported() {
        let result = calculate_usa_tax(
            &test_schedule(),
            dec!(100000),
            FilingStatus::HeadOfHousehold,
        );

        assert_eq!(
            result,
            Err(TaxError::FilingStatusNotCovered {
                jurisdiction: Jurisdiction::Us,
                status: FilingStatus::HeadOfHousehold,
                tax_year: 2026,
            })
        );
    }
}
