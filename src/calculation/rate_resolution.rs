//! Commission rate resolution.
//!
//! This module resolves the commission rate that applies to a piece of
//! work, walking the precedence chain: service-specific rate, then barber
//! override, then branch default, then the engine fallback.

use rust_decimal::Decimal;

use crate::config::EngineDefaults;
use crate::models::RateBook;

/// Where a resolved rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// A service-specific rate for the branch.
    ServiceOverride,
    /// The barber's own commission rate.
    BarberOverride,
    /// The branch's default commission rate from payroll settings.
    BranchDefault,
    /// The engine-wide fallback rate.
    EngineFallback,
}

/// The result of a rate resolution: the rate plus its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRate {
    /// The resolved commission rate in percent.
    pub rate: Decimal,
    /// Which link of the chain supplied the rate.
    pub source: RateSource,
}

/// Resolves the commission rate for a barber, optionally for a specific
/// service.
///
/// The precedence chain is:
/// 1. The branch's rate for the service, when `service_id` is given
/// 2. The barber's own commission rate
/// 3. The branch's default commission rate from payroll settings
/// 4. The engine fallback rate
///
/// # Example
///
/// ```
/// use ledger_engine::calculation::{resolve_commission_rate, RateSource};
/// use ledger_engine::config::EngineDefaults;
/// use ledger_engine::models::RateBook;
///
/// let book = RateBook::new();
/// let defaults = EngineDefaults::standard();
/// let resolved = resolve_commission_rate(&book, &defaults, "barber_a", "branch_1", None);
/// assert_eq!(resolved.source, RateSource::EngineFallback);
/// ```
pub fn resolve_commission_rate(
    rates: &RateBook,
    defaults: &EngineDefaults,
    barber_id: &str,
    branch_id: &str,
    service_id: Option<&str>,
) -> ResolvedRate {
    if let Some(service_id) = service_id {
        if let Some(rate) = rates.service_rate(branch_id, service_id) {
            return ResolvedRate {
                rate,
                source: RateSource::ServiceOverride,
            };
        }
    }

    if let Some(rate) = rates.barber_rate(barber_id) {
        return ResolvedRate {
            rate,
            source: RateSource::BarberOverride,
        };
    }

    if let Some(settings) = rates.settings_for(branch_id) {
        return ResolvedRate {
            rate: settings.default_commission_rate,
            source: RateSource::BranchDefault,
        };
    }

    ResolvedRate {
        rate: defaults.fallback_commission_rate,
        source: RateSource::EngineFallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BarberCommissionRate, PayoutFrequency, PayrollSettings, ServiceCommissionRate,
    };
    use chrono::Utc;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn book_with_all_levels() -> RateBook {
        let mut book = RateBook::new();
        book.set_service_rate(ServiceCommissionRate {
            branch_id: "branch_1".to_string(),
            service_id: "haircut".to_string(),
            rate: dec("25"),
            updated_at: Utc::now(),
        })
        .unwrap();
        book.set_barber_rate(BarberCommissionRate {
            barber_id: "barber_a".to_string(),
            rate: dec("18"),
            updated_at: Utc::now(),
        })
        .unwrap();
        book.upsert_payroll_settings(PayrollSettings {
            branch_id: "branch_1".to_string(),
            default_commission_rate: dec("15"),
            payout_frequency: PayoutFrequency::Weekly,
            payout_day: 5,
            tax_rate: dec("0"),
            updated_at: Utc::now(),
        })
        .unwrap();
        book
    }

    #[test]
    fn test_service_rate_wins() {
        let book = book_with_all_levels();
        let defaults = EngineDefaults::standard();

        let resolved =
            resolve_commission_rate(&book, &defaults, "barber_a", "branch_1", Some("haircut"));
        assert_eq!(resolved.rate, dec("25"));
        assert_eq!(resolved.source, RateSource::ServiceOverride);
    }

    #[test]
    fn test_barber_rate_when_no_service_rate() {
        let book = book_with_all_levels();
        let defaults = EngineDefaults::standard();

        let resolved =
            resolve_commission_rate(&book, &defaults, "barber_a", "branch_1", Some("shave"));
        assert_eq!(resolved.rate, dec("18"));
        assert_eq!(resolved.source, RateSource::BarberOverride);
    }

    #[test]
    fn test_branch_default_when_no_barber_rate() {
        let book = book_with_all_levels();
        let defaults = EngineDefaults::standard();

        let resolved = resolve_commission_rate(&book, &defaults, "barber_b", "branch_1", None);
        assert_eq!(resolved.rate, dec("15"));
        assert_eq!(resolved.source, RateSource::BranchDefault);
    }

    #[test]
    fn test_engine_fallback_when_nothing_configured() {
        let book = RateBook::new();
        let defaults = EngineDefaults::standard();

        let resolved = resolve_commission_rate(&book, &defaults, "barber_b", "branch_2", None);
        assert_eq!(resolved.rate, dec("10"));
        assert_eq!(resolved.source, RateSource::EngineFallback);
    }

    #[test]
    fn test_barber_level_resolution_ignores_service_rates() {
        let book = book_with_all_levels();
        let defaults = EngineDefaults::standard();

        // No service_id: the service override must not apply.
        let resolved = resolve_commission_rate(&book, &defaults, "barber_a", "branch_1", None);
        assert_eq!(resolved.rate, dec("18"));
        assert_eq!(resolved.source, RateSource::BarberOverride);
    }
}
