use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{effective_rate, to_percent};
use crate::calculations::progressive::evaluate;
use crate::error::TaxError;
use crate::models::{
    BracketContribution, ContributionKind, Currency, Jurisdiction, TaxCalculationResult,
};
use crate::schedule::TaxSchedule;

/// Label of the cess line in the breakdown.
pub const CESS_LABEL: &str = "Cess";

/// Indian income tax (new regime) on `income`, in INR.
///
/// The health and education cess is levied on the bracket total and appended
/// to the breakdown as a [`ContributionKind::Surcharge`] line whose taxable
/// amount is the pre-cess tax. The marginal rate is the bracket rate; the cess
/// is not folded into it.
///
/// # Errors
///
/// [`TaxError::NegativeAmount`] for negative income;
/// [`TaxError::UnsupportedJurisdiction`] if the schedule has no India table.
pub fn calculate_india_tax(
    schedule: &TaxSchedule,
    income: Decimal,
) -> Result<TaxCalculationResult, TaxError> {
    let table = schedule.income_brackets(Jurisdiction::India, None)?;
    let mut result = evaluate(income, table, Currency::Inr)?;

    let cess_rate = schedule.config().india_cess_rate;
    let income_tax = result.total_tax;
    let cess = income_tax * cess_rate;

    if cess > Decimal::ZERO {
        debug!(%income_tax, %cess, "adding health and education cess");
        let rate = to_percent(cess_rate);
        result.breakdown.push(BracketContribution {
            bracket: CESS_LABEL.to_string(),
            range: format!("{rate}% of income tax"),
            rate,
            taxable_in_bracket: income_tax,
            tax_paid: cess,
            kind: ContributionKind::Surcharge,
        });
        result.total_tax += cess;
        result.effective_rate = effective_rate(result.total_tax, result.income);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::jurisdictions::test_schedule;

    #[test]
    fn income_within_exempt_band_has_no_cess_line() {
        let result = calculate_india_tax(&test_schedule(), dec!(400000)).unwrap();

        assert_eq!(result.total_tax, dec!(0));
        assert!(result.breakdown.iter().all(|b| b.kind == ContributionKind::Bracket));
    }

    #[test]
    fn cess_is_four_percent_of_income_tax() {
        let result = calculate_india_tax(&test_schedule(), dec!(600000)).unwrap();

        // 200,000 × 5% = 10,000, plus 4% cess
        assert_eq!(result.total_tax, dec!(10400));
        assert_eq!(result.marginal_rate, dec!(5));

        let cess = result.breakdown.last().unwrap();
        assert_eq!(cess.bracket, "Cess");
        assert_eq!(cess.range, "4% of income tax");
        assert_eq!(cess.rate, dec!(4));
        assert_eq!(cess.taxable_in_bracket, dec!(10000));
        assert_eq!(cess.tax_paid, dec!(400));
        assert_eq!(cess.kind, ContributionKind::Surcharge);
    }

    #[test]
    fn effective_rate_includes_cess() {
        let result = calculate_india_tax(&test_schedule(), dec!(600000)).unwrap();

        let expected = dec!(10400) / dec!(600000) * dec!(100);
        assert_eq!(result.effective_rate, expected);
    }

    #[test]
    fn breakdown_still_sums_to_total() {
        let result = calculate_india_tax(&test_schedule(), dec!(3000000)).unwrap();

        let sum: Decimal = result.breakdown.iter().map(|b| b.tax_paid).sum();
        assert_eq!(sum, result.total_tax);
    }
}
