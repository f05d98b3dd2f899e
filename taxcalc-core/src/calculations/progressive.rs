//! Progressive (marginal-rate) tax evaluation.
//!
//! Income is cut into slices by a [`BracketTable`]; each slice is taxed at
//! its bracket's rate and the results are summed.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use taxcalc_core::calculations::progressive::evaluate;
//! use taxcalc_core::{BracketTable, Currency, TaxBracket};
//!
//! let table = BracketTable::new(vec![
//!     TaxBracket::new(dec!(0), Some(dec!(12400)), dec!(0.10)),
//!     TaxBracket::new(dec!(12400), Some(dec!(50400)), dec!(0.12)),
//!     TaxBracket::new(dec!(50400), None, dec!(0.22)),
//! ])
//! .unwrap();
//!
//! let result = evaluate(dec!(30000), &table, Currency::Usd).unwrap();
//!
//! // 12,400 × 10% + 17,600 × 12%
//! assert_eq!(result.total_tax, dec!(3352));
//! assert_eq!(result.marginal_rate, dec!(12));
//! assert_eq!(result.breakdown.len(), 2);
//! ```

use rust_decimal::Decimal;
use tracing::trace;

use crate::calculations::common::{effective_rate, require_non_negative, to_percent};
use crate::error::TaxError;
use crate::models::{
    BracketContribution, BracketTable, ContributionKind, Currency, TaxBracket, TaxCalculationResult,
};

/// Applies `table` to `income`.
///
/// Brackets are half-open, so an income exactly on a boundary fills the
/// lower bracket and leaves nothing for the next. Brackets that receive no
/// income are left out of the breakdown, and the marginal rate is the rate
/// of the last bracket that received any.
///
/// # Errors
///
/// [`TaxError::NegativeAmount`] if `income` is negative.
pub fn evaluate(
    income: Decimal,
    table: &BracketTable,
    currency: Currency,
) -> Result<TaxCalculationResult, TaxError> {
    let income = require_non_negative("income", income)?;

    let mut remaining = income;
    let mut total_tax = Decimal::ZERO;
    let mut marginal_rate = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for bracket in table.brackets() {
        if remaining <= Decimal::ZERO {
            break;
        }

        let taxable = match bracket.size() {
            Some(size) => remaining.min(size).max(Decimal::ZERO),
            None => remaining,
        };
        if taxable > Decimal::ZERO {
            let tax_paid = taxable * bracket.tax_rate;
            total_tax += tax_paid;
            marginal_rate = to_percent(bracket.tax_rate);
            breakdown.push(BracketContribution {
                bracket: bracket_label(bracket),
                range: format_range(bracket, currency),
                rate: marginal_rate,
                taxable_in_bracket: taxable,
                tax_paid,
                kind: ContributionKind::Bracket,
            });
        }
        remaining -= taxable;
    }

    trace!(%income, %total_tax, %marginal_rate, brackets = breakdown.len(), "evaluated brackets");

    Ok(TaxCalculationResult {
        income,
        currency,
        total_tax,
        effective_rate: effective_rate(total_tax, income),
        marginal_rate,
        breakdown,
    })
}

/// The bracket's label, or its rate (e.g. `"22%"`) when it has none.
pub fn bracket_label(bracket: &TaxBracket) -> String {
    match &bracket.label {
        Some(label) => label.clone(),
        None => format!("{}%", to_percent(bracket.tax_rate)),
    }
}

/// Human-readable bracket range such as `£12,570 - £50,270` or `$640,600 - ∞`.
pub fn format_range(
    bracket: &TaxBracket,
    currency: Currency,
) -> String {
    let max = bracket
        .max_income
        .map_or_else(|| "∞".to_string(), |max| currency.format_amount(max));
    format!("{} - {max}", currency.format_amount(bracket.min_income))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn test_table() -> BracketTable {
        BracketTable::new(vec![
            TaxBracket::new(dec!(0), Some(dec!(12400)), dec!(0.10)),
            TaxBracket::new(dec!(12400), Some(dec!(50400)), dec!(0.12)),
            TaxBracket::new(dec!(50400), Some(dec!(105700)), dec!(0.22)),
            TaxBracket::new(dec!(105700), None, dec!(0.24)).with_label("Top"),
        ])
        .unwrap()
    }

    fn breakdown_sum(result: &TaxCalculationResult) -> Decimal {
        result.breakdown.iter().map(|b| b.tax_paid).sum()
    }

    // =========================================================================
    // totals
    // =========================================================================

    #[test]
    fn zero_income_has_zero_tax_and_rates() {
        let result = evaluate(dec!(0), &test_table(), Currency::Usd).unwrap();

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
        assert_eq!(result.marginal_rate, dec!(0));
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn income_within_first_bracket() {
        let result = evaluate(dec!(10000), &test_table(), Currency::Usd).unwrap();

        assert_eq!(result.total_tax, dec!(1000));
        assert_eq!(result.marginal_rate, dec!(10));
        assert_eq!(result.effective_rate, dec!(10));
    }

    #[test]
    fn income_spanning_three_brackets() {
        let result = evaluate(dec!(100000), &test_table(), Currency::Usd).unwrap();

        // 12,400 × 10% + 38,000 × 12% + 49,600 × 22% = 1,240 + 4,560 + 10,912
        assert_eq!(result.total_tax, dec!(16712));
        assert_eq!(result.marginal_rate, dec!(22));
        assert_eq!(result.effective_rate, dec!(16.712));
        assert_eq!(breakdown_sum(&result), result.total_tax);
    }

    #[test]
    fn income_in_open_top_bracket() {
        let result = evaluate(dec!(205700), &test_table(), Currency::Usd).unwrap();

        // 1,240 + 4,560 + 55,300 × 22% + 100,000 × 24%
        assert_eq!(result.total_tax, dec!(1240) + dec!(4560) + dec!(12166) + dec!(24000));
        assert_eq!(result.marginal_rate, dec!(24));
        assert_eq!(result.breakdown.len(), 4);
    }

    #[test]
    fn negative_income_is_rejected() {
        let result = evaluate(dec!(-1), &test_table(), Currency::Usd);

        assert_eq!(
            result,
            Err(TaxError::NegativeAmount {
                field: "income",
                value: dec!(-1),
            })
        );
    }

    // =========================================================================
    // boundaries
    // =========================================================================

    #[test]
    fn income_on_boundary_stays_in_lower_bracket() {
        let result = evaluate(dec!(12400), &test_table(), Currency::Usd).unwrap();

        assert_eq!(result.total_tax, dec!(1240));
        assert_eq!(result.marginal_rate, dec!(10));
        assert_eq!(result.breakdown.len(), 1);
    }

    #[test]
    fn one_cent_over_boundary_reaches_next_bracket() {
        let result = evaluate(dec!(12400.01), &test_table(), Currency::Usd).unwrap();

        assert_eq!(result.total_tax, dec!(1240.0012));
        assert_eq!(result.marginal_rate, dec!(12));
        assert_eq!(result.breakdown.len(), 2);
    }

    #[test]
    fn zero_width_bracket_is_skipped() {
        let table = BracketTable::new(vec![
            TaxBracket::new(dec!(0), Some(dec!(0)), dec!(0)),
            TaxBracket::new(dec!(0), Some(dec!(50270)), dec!(0.20)),
            TaxBracket::new(dec!(50270), None, dec!(0.40)),
        ])
        .unwrap();

        let result = evaluate(dec!(10000), &table, Currency::Gbp).unwrap();

        assert_eq!(result.total_tax, dec!(2000));
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].range, "£0 - £50,270");
    }

    #[test]
    fn zero_rate_bracket_still_sets_marginal_rate() {
        let table = BracketTable::new(vec![
            TaxBracket::new(dec!(0), Some(dec!(12570)), dec!(0)),
            TaxBracket::new(dec!(12570), None, dec!(0.20)),
        ])
        .unwrap();

        let result = evaluate(dec!(5000), &table, Currency::Gbp).unwrap();

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.marginal_rate, dec!(0));
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].tax_paid, dec!(0));
    }

    // =========================================================================
    // breakdown formatting
    // =========================================================================

    #[test]
    fn breakdown_labels_and_ranges() {
        let result = evaluate(dec!(200000), &test_table(), Currency::Usd).unwrap();

        let labels: Vec<&str> = result.breakdown.iter().map(|b| b.bracket.as_str()).collect();
        assert_eq!(labels, vec!["10%", "12%", "22%", "Top"]);
        assert_eq!(result.breakdown[1].range, "$12,400 - $50,400");
        assert_eq!(result.breakdown[3].range, "$105,700 - ∞");
        assert_eq!(result.breakdown[3].taxable_in_bracket, dec!(94300));
        assert_eq!(result.breakdown[3].rate, dec!(24));
    }

    #[test]
    fn every_bracket_line_is_a_bracket_kind() {
        let result = evaluate(dec!(200000), &test_table(), Currency::Usd).unwrap();

        assert!(result
            .breakdown
            .iter()
            .all(|b| b.kind == ContributionKind::Bracket));
    }
}
