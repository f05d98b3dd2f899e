use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a monetary amount.
#[derive(Debug, Error)]
pub enum ParseAmountError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a command-line amount into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`). Sign checks are
/// left to the calculators so negative input gets the same error everywhere.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid amount: {}", e);
        ParseAmountError::Invalid {
            input: s.to_string(),
            source: e,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_amount_accepts_comma_thousands_separator() {
        assert_eq!(parse_amount("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_amount_keeps_sign() {
        assert_eq!(parse_amount("-500").unwrap(), dec!(-500));
    }

    #[test]
    fn parse_amount_empty_is_an_error() {
        assert!(matches!(parse_amount(""), Err(ParseAmountError::Empty)));
        assert!(matches!(parse_amount("   "), Err(ParseAmountError::Empty)));
    }

    #[test]
    fn parse_amount_invalid_returns_error() {
        assert!(matches!(parse_amount("abc"), Err(ParseAmountError::Invalid { .. })));
    }
}
