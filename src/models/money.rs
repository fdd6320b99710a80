//! Monetary helpers shared across the engine.
//!
//! All persisted currency amounts are rounded to two decimal places
//! (centavos) with midpoint-away-from-zero rounding. Percentages live in
//! the 0-100 domain and are validated at every write boundary.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{LedgerError, LedgerResult};

/// Rounds a monetary amount to two decimal places.
///
/// # Example
///
/// ```
/// use ledger_engine::models::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rounded = round_currency(Decimal::from_str("12.345").unwrap());
/// assert_eq!(rounded, Decimal::from_str("12.35").unwrap());
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes `rate` percent of `amount` without rounding.
pub fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate / Decimal::from(100)
}

/// Validates that a percentage rate lies in the 0-100 domain.
pub fn validate_percent(field: &str, value: Decimal) -> LedgerResult<()> {
    if value < Decimal::ZERO || value > Decimal::from(100) {
        return Err(LedgerError::RateOutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

/// Validates that a monetary amount is not negative.
pub fn validate_non_negative(field: &str, value: Decimal) -> LedgerResult<()> {
    if value < Decimal::ZERO {
        return Err(LedgerError::InvalidInput {
            field: field.to_string(),
            message: "cannot be negative".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_currency_half_up() {
        assert_eq!(round_currency(dec("10.005")), dec("10.01"));
        assert_eq!(round_currency(dec("10.004")), dec("10.00"));
    }

    #[test]
    fn test_round_currency_negative_midpoint_away_from_zero() {
        assert_eq!(round_currency(dec("-10.005")), dec("-10.01"));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(dec("1000"), dec("10")), dec("100"));
        assert_eq!(percent_of(dec("500"), dec("5")), dec("25"));
    }

    #[test]
    fn test_validate_percent_accepts_bounds() {
        assert!(validate_percent("rate", dec("0")).is_ok());
        assert!(validate_percent("rate", dec("100")).is_ok());
        assert!(validate_percent("rate", dec("33.33")).is_ok());
    }

    #[test]
    fn test_validate_percent_rejects_out_of_range() {
        assert!(validate_percent("rate", dec("-1")).is_err());

        match validate_percent("commission_rate", dec("120")) {
            Err(LedgerError::RateOutOfRange { field, value }) => {
                assert_eq!(field, "commission_rate");
                assert_eq!(value, dec("120"));
            }
            other => panic!("Expected RateOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("amount", dec("0")).is_ok());
        assert!(validate_non_negative("amount", dec("-0.01")).is_err());
    }
}
