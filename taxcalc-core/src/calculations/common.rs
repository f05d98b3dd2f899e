//! Common utility functions for tax calculations.
//!
//! This module provides shared functionality used across the calculators,
//! including rounding, rate conversion and input validation.

use rust_decimal::Decimal;

use crate::error::TaxError;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use taxcalc_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a fractional rate (`0.22`) to a percentage (`22`).
pub fn to_percent(rate: Decimal) -> Decimal {
    (rate * Decimal::ONE_HUNDRED).normalize()
}

/// Total tax as a percentage of income; zero when there is no income.
pub fn effective_rate(
    total_tax: Decimal,
    income: Decimal,
) -> Decimal {
    if income > Decimal::ZERO {
        total_tax / income * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Renders a percentage with at most two decimal places, e.g. `31.97%`.
pub fn format_percent(percent: Decimal) -> String {
    format!("{}%", round_half_up(percent).normalize())
}

/// Rejects negative monetary inputs.
///
/// # Errors
///
/// [`TaxError::NegativeAmount`] naming `field` when `value < 0`.
pub fn require_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, TaxError> {
    if value < Decimal::ZERO {
        return Err(TaxError::NegativeAmount { field, value });
    }
    Ok(value)
}
