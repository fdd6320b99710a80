//! Service commission calculation from completed, paid bookings.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::EngineDefaults;
use crate::models::{percent_of, Booking, RateBook};

use super::rate_resolution::resolve_commission_rate;

/// The result of a service commission calculation.
#[derive(Debug, Clone, Default)]
pub struct ServiceCommissionResult {
    /// Total commission across all bookings.
    pub total: Decimal,
    /// Service revenue across all bookings.
    pub revenue: Decimal,
    /// Number of bookings commissioned.
    pub count: u32,
    /// Commission grouped by calendar day.
    pub by_day: BTreeMap<NaiveDate, Decimal>,
}

/// Computes per-booking service commission, grouped by calendar day.
///
/// Each booking resolves its own rate through the precedence chain, so a
/// service-specific override applies per booking while the rest of the
/// bookings fall through to the barber or branch rate. Amounts are kept
/// unrounded; callers round once at the persistence boundary.
pub fn calculate_service_commission(
    barber_id: &str,
    branch_id: &str,
    bookings: &[Booking],
    rates: &RateBook,
    defaults: &EngineDefaults,
) -> ServiceCommissionResult {
    let mut result = ServiceCommissionResult::default();

    for booking in bookings {
        let resolved = resolve_commission_rate(
            rates,
            defaults,
            barber_id,
            branch_id,
            Some(&booking.service_id),
        );
        let commission = percent_of(booking.price, resolved.rate);

        result.revenue += booking.price;
        result.total += commission;
        result.count += 1;
        *result.by_day.entry(booking.date).or_default() += commission;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServiceCommissionRate;
    use chrono::Utc;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn booking(id: &str, day: u32, service: &str, price: &str) -> Booking {
        Booking {
            id: id.to_string(),
            barber_id: "barber_a".to_string(),
            branch_id: "branch_1".to_string(),
            service_id: service.to_string(),
            date: date(day),
            price: dec(price),
        }
    }

    #[test]
    fn test_commission_uses_fallback_rate() {
        let bookings = vec![booking("b1", 3, "haircut", "1000")];
        let result = calculate_service_commission(
            "barber_a",
            "branch_1",
            &bookings,
            &RateBook::new(),
            &EngineDefaults::standard(),
        );

        assert_eq!(result.total, dec("100"));
        assert_eq!(result.revenue, dec("1000"));
        assert_eq!(result.count, 1);
        assert_eq!(result.by_day.get(&date(3)), Some(&dec("100")));
    }

    #[test]
    fn test_commission_groups_by_day() {
        let bookings = vec![
            booking("b1", 3, "haircut", "500"),
            booking("b2", 3, "haircut", "300"),
            booking("b3", 4, "haircut", "400"),
        ];
        let result = calculate_service_commission(
            "barber_a",
            "branch_1",
            &bookings,
            &RateBook::new(),
            &EngineDefaults::standard(),
        );

        assert_eq!(result.by_day.len(), 2);
        assert_eq!(result.by_day.get(&date(3)), Some(&dec("80")));
        assert_eq!(result.by_day.get(&date(4)), Some(&dec("40")));
        assert_eq!(result.total, dec("120"));
        assert_eq!(result.count, 3);
    }

    #[test]
    fn test_service_override_applies_per_booking() {
        let mut rates = RateBook::new();
        rates
            .set_service_rate(ServiceCommissionRate {
                branch_id: "branch_1".to_string(),
                service_id: "color".to_string(),
                rate: dec("30"),
                updated_at: Utc::now(),
            })
            .unwrap();

        let bookings = vec![
            booking("b1", 3, "color", "1000"),
            booking("b2", 3, "haircut", "1000"),
        ];
        let result = calculate_service_commission(
            "barber_a",
            "branch_1",
            &bookings,
            &rates,
            &EngineDefaults::standard(),
        );

        // 30% of the color booking, fallback 10% of the haircut.
        assert_eq!(result.total, dec("400"));
    }

    #[test]
    fn test_empty_bookings_yield_zero() {
        let result = calculate_service_commission(
            "barber_a",
            "branch_1",
            &[],
            &RateBook::new(),
            &EngineDefaults::standard(),
        );
        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.count, 0);
        assert!(result.by_day.is_empty());
    }
}
