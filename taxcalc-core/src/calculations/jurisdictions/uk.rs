//! UK income tax, including the withdrawal of the personal allowance for
//! high earners.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::progressive::evaluate;
use crate::error::TaxError;
use crate::models::{BracketTable, Currency, Jurisdiction, TaxCalculationResult, TaxYearConfig};
use crate::schedule::TaxSchedule;

/// UK income tax on `income`, in GBP.
///
/// The base table is first adjusted by [`derive_tapered_brackets`], then
/// evaluated progressively.
///
/// # Errors
///
/// [`TaxError::NegativeAmount`] for negative income;
/// [`TaxError::UnsupportedJurisdiction`] if the schedule has no UK table.
pub fn calculate_uk_tax(
    schedule: &TaxSchedule,
    income: Decimal,
) -> Result<TaxCalculationResult, TaxError> {
    let base = schedule.income_brackets(Jurisdiction::Uk, None)?;
    let table = derive_tapered_brackets(base, income, schedule.config())?;
    evaluate(income, &table, Currency::Gbp)
}

/// Returns the bracket table that applies to `income` after the personal
/// allowance taper.
///
/// The allowance is the upper bound of the first bracket. Above the taper
/// threshold it shrinks by one unit for every `ratio` units of income over
/// the threshold (rounded down), never below zero. The first bracket's upper
/// bound and the second bracket's lower bound move together, so the table
/// stays contiguous; at full withdrawal the first bracket is zero-width.
///
/// At or below the threshold the base table is returned unchanged.
///
/// # Errors
///
/// [`TaxError::Schedule`] if the adjusted table fails validation, which
/// cannot happen for a valid base table.
pub fn derive_tapered_brackets(
    base: &BracketTable,
    income: Decimal,
    config: &TaxYearConfig,
) -> Result<BracketTable, TaxError> {
    let threshold = config.uk_allowance_taper_threshold;
    let ratio = config.uk_allowance_taper_ratio;

    let allowance = match base.brackets() {
        [first, _, ..] => first.max_income,
        _ => None,
    };
    let Some(allowance) = allowance else {
        return Ok(base.clone());
    };
    if income <= threshold || ratio <= Decimal::ZERO {
        return Ok(base.clone());
    }

    let reduction = ((income - threshold) / ratio).floor().min(allowance);
    debug!(%income, %allowance, %reduction, "tapering personal allowance");

    let mut brackets = base.brackets().to_vec();
    brackets[0].max_income = Some(allowance - reduction);
    brackets[1].min_income -= reduction;

    Ok(BracketTable::new(brackets)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::jurisdictions::test_schedule;

    fn uk_table() -> BracketTable {
        test_schedule()
            .income_brackets(Jurisdiction::Uk, None)
            .unwrap()
            .clone()
    }

    fn allowance(table: &BracketTable) -> Decimal {
        table.brackets()[0].max_income.unwrap()
    }

    // =========================================================================
    // derive_tapered_brackets
    // =========================================================================

    #[test]
    fn no_taper_at_threshold() {
        let schedule = test_schedule();
        let table = derive_tapered_brackets(&uk_table(), dec!(100000), schedule.config()).unwrap();

        assert_eq!(table, uk_table());
    }

    #[test]
    fn partial_taper_moves_both_bounds() {
        let schedule = test_schedule();
        let table = derive_tapered_brackets(&uk_table(), dec!(110000), schedule.config()).unwrap();

        assert_eq!(allowance(&table), dec!(7570));
        assert_eq!(table.brackets()[1].min_income, dec!(7570));
        assert_eq!(table.brackets()[1].max_income, Some(dec!(50270)));
    }

    #[test]
    fn reduction_rounds_down() {
        let schedule = test_schedule();
        let table = derive_tapered_brackets(&uk_table(), dec!(100003), schedule.config()).unwrap();

        assert_eq!(allowance(&table), dec!(12569));
    }

    #[test]
    fn allowance_fully_withdrawn_at_125140() {
        let schedule = test_schedule();
        let table = derive_tapered_brackets(&uk_table(), dec!(125140), schedule.config()).unwrap();

        assert_eq!(allowance(&table), dec!(0));
        assert_eq!(table.brackets()[1].min_income, dec!(0));
    }

    #[test]
    fn allowance_never_goes_negative() {
        let schedule = test_schedule();
        let table = derive_tapered_brackets(&uk_table(), dec!(500000), schedule.config()).unwrap();

        assert_eq!(allowance(&table), dec!(0));
    }

    #[test]
    fn base_table_is_left_untouched() {
        let schedule = test_schedule();
        let base = uk_table();
        let _ = derive_tapered_brackets(&base, dec!(125140), schedule.config()).unwrap();

        assert_eq!(allowance(&base), dec!(12570));
    }

    // =========================================================================
    // calculate_uk_tax
    // =========================================================================

    #[test]
    fn tax_at_100k_keeps_full_allowance() {
        let result = calculate_uk_tax(&test_schedule(), dec!(100000)).unwrap();

        // 37,700 × 20% + 49,730 × 40%
        assert_eq!(result.total_tax, dec!(27432));
        assert_eq!(result.marginal_rate, dec!(40));
        assert_eq!(result.breakdown[0].bracket, "Personal Allowance");
    }

    #[test]
    fn tax_at_125140_has_no_allowance_line() {
        let result = calculate_uk_tax(&test_schedule(), dec!(125140)).unwrap();

        // 50,270 × 20% + 74,870 × 40%
        assert_eq!(result.total_tax, dec!(40002));
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[0].bracket, "Basic Rate");
        assert_eq!(result.breakdown[0].range, "£0 - £50,270");
    }

    #[test]
    fn additional_rate_applies_above_125140() {
        let result = calculate_uk_tax(&test_schedule(), dec!(150000)).unwrap();

        // 10,054 + 29,948 + 24,860 × 45%
        assert_eq!(result.total_tax, dec!(51189));
        assert_eq!(result.marginal_rate, dec!(45));
    }
}
