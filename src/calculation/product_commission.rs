//! Product commission calculation from point-of-sale transactions.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::EngineDefaults;
use crate::models::{percent_of, ProductShare, RateBook, Sale};

use super::rate_resolution::resolve_commission_rate;

/// The result of a product commission calculation.
#[derive(Debug, Clone, Default)]
pub struct ProductCommissionResult {
    /// Total commission across all sale lines.
    pub total: Decimal,
    /// Product revenue across all sale lines.
    pub revenue: Decimal,
    /// Units sold across all sale lines.
    pub quantity: u32,
    /// Commission grouped by calendar day.
    pub by_day: BTreeMap<NaiveDate, Decimal>,
}

/// Computes per-line product commission, grouped by calendar day.
///
/// A product with a configured share earns either a fixed amount per unit
/// or a percentage of the line revenue. Lines without a setting fall back
/// to the barber-level commission rate.
pub fn calculate_product_commission(
    barber_id: &str,
    branch_id: &str,
    sales: &[Sale],
    rates: &RateBook,
    defaults: &EngineDefaults,
) -> ProductCommissionResult {
    let fallback = resolve_commission_rate(rates, defaults, barber_id, branch_id, None).rate;
    let mut result = ProductCommissionResult::default();

    for sale in sales {
        for line in &sale.lines {
            let revenue = line.line_total();
            let commission = match rates.product_setting(branch_id, &line.product_id) {
                Some(setting) => match setting.share {
                    ProductShare::FixedPerUnit(amount) => amount * Decimal::from(line.quantity),
                    ProductShare::Percentage(rate) => percent_of(revenue, rate),
                },
                None => percent_of(revenue, fallback),
            };

            result.revenue += revenue;
            result.total += commission;
            result.quantity += line.quantity;
            *result.by_day.entry(sale.date).or_default() += commission;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductCommissionSetting, SaleLine};
    use chrono::Utc;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn sale(day: u32, lines: Vec<SaleLine>) -> Sale {
        Sale {
            id: format!("txn_{}", day),
            barber_id: "barber_a".to_string(),
            branch_id: "branch_1".to_string(),
            date: date(day),
            lines,
        }
    }

    fn line(product: &str, price: &str, quantity: u32) -> SaleLine {
        SaleLine {
            product_id: product.to_string(),
            price: dec(price),
            quantity,
        }
    }

    fn rates_with(share: ProductShare) -> RateBook {
        let mut rates = RateBook::new();
        rates
            .set_product_setting(ProductCommissionSetting {
                branch_id: "branch_1".to_string(),
                product_id: "pomade".to_string(),
                share,
                updated_at: Utc::now(),
            })
            .unwrap();
        rates
    }

    #[test]
    fn test_fixed_per_unit_share() {
        let rates = rates_with(ProductShare::FixedPerUnit(dec("25")));
        let sales = vec![sale(3, vec![line("pomade", "250", 3)])];

        let result = calculate_product_commission(
            "barber_a",
            "branch_1",
            &sales,
            &rates,
            &EngineDefaults::standard(),
        );

        assert_eq!(result.total, dec("75"));
        assert_eq!(result.revenue, dec("750"));
        assert_eq!(result.quantity, 3);
    }

    #[test]
    fn test_percentage_share() {
        let rates = rates_with(ProductShare::Percentage(dec("20")));
        let sales = vec![sale(3, vec![line("pomade", "250", 2)])];

        let result = calculate_product_commission(
            "barber_a",
            "branch_1",
            &sales,
            &rates,
            &EngineDefaults::standard(),
        );

        assert_eq!(result.total, dec("100"));
    }

    #[test]
    fn test_missing_setting_falls_back_to_barber_rate() {
        let sales = vec![sale(3, vec![line("shampoo", "180", 1)])];

        let result = calculate_product_commission(
            "barber_a",
            "branch_1",
            &sales,
            &RateBook::new(),
            &EngineDefaults::standard(),
        );

        // 10% engine fallback applied to the line total.
        assert_eq!(result.total, dec("18"));
    }

    #[test]
    fn test_groups_by_day() {
        let rates = rates_with(ProductShare::FixedPerUnit(dec("10")));
        let sales = vec![
            sale(3, vec![line("pomade", "250", 1)]),
            sale(5, vec![line("pomade", "250", 2)]),
        ];

        let result = calculate_product_commission(
            "barber_a",
            "branch_1",
            &sales,
            &rates,
            &EngineDefaults::standard(),
        );

        assert_eq!(result.by_day.get(&date(3)), Some(&dec("10")));
        assert_eq!(result.by_day.get(&date(5)), Some(&dec("20")));
    }
}
