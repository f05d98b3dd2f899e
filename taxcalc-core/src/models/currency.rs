use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;

/// Currencies of the supported jurisdictions.
///
/// Only used for labelling amounts; the engine never converts between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Gbp,
    Inr,
    Ngn,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Inr => "INR",
            Self::Ngn => "NGN",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Gbp => "£",
            Self::Inr => "₹",
            Self::Ngn => "₦",
        }
    }

    /// Formats `value` with the currency symbol and thousands separators.
    ///
    /// The value is rounded half-up to two places; whole amounts are
    /// printed without a fractional part.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use taxcalc_core::Currency;
    ///
    /// assert_eq!(Currency::Gbp.format_amount(dec!(125140)), "£125,140");
    /// assert_eq!(Currency::Usd.format_amount(dec!(1192.5)), "$1,192.50");
    /// assert_eq!(Currency::Ngn.format_amount(dec!(-800000)), "-₦800,000");
    /// ```
    pub fn format_amount(
        &self,
        value: Decimal,
    ) -> String {
        let rounded = round_half_up(value);
        let sign = if rounded < Decimal::ZERO { "-" } else { "" };
        let abs = rounded.abs();
        let whole = group_thousands(&abs.trunc().to_string());
        let cents = (abs.fract() * Decimal::ONE_HUNDRED)
            .round()
            .to_u32()
            .unwrap_or(0);

        if cents == 0 {
            format!("{sign}{}{whole}", self.symbol())
        } else {
            format!("{sign}{}{whole}.{cents:02}", self.symbol())
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
