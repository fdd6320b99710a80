//! Configuration types for the ledger engine.
//!
//! This module contains the strongly-typed defaults structure that is
//! deserialized from the engine YAML configuration file.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Engine-wide defaults loaded from `config/engine.yaml`.
///
/// These values back the last link of every resolution chain: the
/// commission rate used when neither a barber override nor branch payroll
/// settings exist, and the tolerance applied to the accounting equation
/// before a period may close.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineDefaults {
    /// Commission rate (percent) used when no other rate is configured.
    pub fallback_commission_rate: Decimal,
    /// Maximum allowed |assets - (liabilities + equity)| on period close.
    pub balance_epsilon: Decimal,
    /// ISO currency code for reported amounts.
    pub currency: String,
}

impl EngineDefaults {
    /// Returns the built-in defaults used when no configuration file is
    /// available (10% fallback commission, one peso of balance tolerance).
    pub fn standard() -> Self {
        Self {
            fallback_commission_rate: Decimal::from(10),
            balance_epsilon: Decimal::ONE,
            currency: "PHP".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_defaults() {
        let defaults = EngineDefaults::standard();
        assert_eq!(defaults.fallback_commission_rate, Decimal::from(10));
        assert_eq!(defaults.balance_epsilon, Decimal::ONE);
        assert_eq!(defaults.currency, "PHP");
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let yaml = r#"
fallback_commission_rate: 10
balance_epsilon: "1.00"
currency: PHP
"#;
        let defaults: EngineDefaults = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(defaults.fallback_commission_rate, Decimal::from(10));
        assert_eq!(defaults.currency, "PHP");
    }
}
