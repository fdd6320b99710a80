//! Daily pay with the guaranteed daily-rate floor.
//!
//! For every worked day the barber earns the greater of that day's service
//! commission and the guaranteed daily rate. Product commission is added
//! on top and never counts toward the floor comparison.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// The result of the daily pay calculation.
#[derive(Debug, Clone, Default)]
pub struct DailyPayResult {
    /// Sum over worked days of `max(day service commission, daily rate)`.
    pub total: Decimal,
    /// Distinct days with at least one qualifying booking or sale.
    pub days_worked: u32,
}

/// Applies the daily-rate floor over the worked days.
///
/// A day counts as worked when it appears in either commission map; a day
/// with only product activity still earns the daily rate for its service
/// portion. Days with no activity at all earn nothing.
///
/// # Example
///
/// ```
/// use ledger_engine::calculation::calculate_daily_pay;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::collections::BTreeMap;
/// use std::str::FromStr;
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let mut service = BTreeMap::new();
/// service.insert(day, Decimal::from(300));
///
/// let result = calculate_daily_pay(Decimal::from(500), &service, &BTreeMap::new());
/// assert_eq!(result.total, Decimal::from(500)); // floor wins
/// assert_eq!(result.days_worked, 1);
/// ```
pub fn calculate_daily_pay(
    daily_rate: Decimal,
    service_by_day: &BTreeMap<NaiveDate, Decimal>,
    product_by_day: &BTreeMap<NaiveDate, Decimal>,
) -> DailyPayResult {
    let worked_days: BTreeSet<NaiveDate> = service_by_day
        .keys()
        .chain(product_by_day.keys())
        .copied()
        .collect();

    let mut total = Decimal::ZERO;
    for day in &worked_days {
        let day_commission = service_by_day.get(day).copied().unwrap_or(Decimal::ZERO);
        total += day_commission.max(daily_rate);
    }

    DailyPayResult {
        total,
        days_worked: worked_days.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn day_map(entries: &[(u32, &str)]) -> BTreeMap<NaiveDate, Decimal> {
        entries.iter().map(|(d, v)| (date(*d), dec(v))).collect()
    }

    #[test]
    fn test_floor_wins_when_commission_is_low() {
        let service = day_map(&[(3, "300")]);
        let result = calculate_daily_pay(dec("500"), &service, &BTreeMap::new());
        assert_eq!(result.total, dec("500"));
        assert_eq!(result.days_worked, 1);
    }

    #[test]
    fn test_commission_wins_when_above_floor() {
        let service = day_map(&[(3, "700")]);
        let result = calculate_daily_pay(dec("500"), &service, &BTreeMap::new());
        assert_eq!(result.total, dec("700"));
    }

    #[test]
    fn test_floor_applies_per_day_not_per_period() {
        // Day 3 is under the floor, day 4 is above it. The floor tops up
        // day 3 only; it never averages across the period.
        let service = day_map(&[(3, "300"), (4, "700")]);
        let result = calculate_daily_pay(dec("500"), &service, &BTreeMap::new());
        assert_eq!(result.total, dec("1200"));
        assert_eq!(result.days_worked, 2);
    }

    #[test]
    fn test_product_only_day_earns_the_floor() {
        let product = day_map(&[(5, "40")]);
        let result = calculate_daily_pay(dec("500"), &BTreeMap::new(), &product);
        assert_eq!(result.total, dec("500"));
        assert_eq!(result.days_worked, 1);
    }

    #[test]
    fn test_no_activity_earns_nothing() {
        let result = calculate_daily_pay(dec("500"), &BTreeMap::new(), &BTreeMap::new());
        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.days_worked, 0);
    }

    #[test]
    fn test_zero_daily_rate_passes_commission_through() {
        let service = day_map(&[(3, "120"), (4, "80")]);
        let result = calculate_daily_pay(Decimal::ZERO, &service, &BTreeMap::new());
        assert_eq!(result.total, dec("200"));
    }

    #[test]
    fn test_days_worked_counts_union_of_days() {
        let service = day_map(&[(3, "100")]);
        let product = day_map(&[(3, "50"), (5, "30")]);
        let result = calculate_daily_pay(Decimal::ZERO, &service, &product);
        assert_eq!(result.days_worked, 2);
    }
}
