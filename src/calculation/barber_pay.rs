//! Full pay computation for one barber over a period.
//!
//! Orchestrates rate resolution, service and product commission, and the
//! daily-rate floor into a single [`PayComputation`] from which the
//! payroll manager builds a record.

use rust_decimal::Decimal;

use crate::config::EngineDefaults;
use crate::models::{percent_of, round_currency, Booking, RateBook, Sale};

use super::daily_pay::calculate_daily_pay;
use super::product_commission::calculate_product_commission;
use super::rate_resolution::resolve_commission_rate;
use super::service_commission::calculate_service_commission;

/// One barber's computed pay, rounded to centavos at every output field.
#[derive(Debug, Clone)]
pub struct PayComputation {
    /// The barber computed for.
    pub barber_id: String,
    /// The barber-level commission rate that was in effect (percent).
    /// Frozen into the payroll record for provenance; service-specific
    /// overrides still applied per booking during computation.
    pub commission_rate: Decimal,
    /// The guaranteed daily rate that was in effect.
    pub daily_rate: Decimal,
    /// Distinct days with at least one qualifying booking or sale.
    pub days_worked: u32,
    /// Number of completed bookings in the period.
    pub total_services: u32,
    /// Service revenue across the period.
    pub service_revenue: Decimal,
    /// Raw service commission before the daily-rate floor.
    pub service_commission: Decimal,
    /// Product revenue across the period.
    pub product_revenue: Decimal,
    /// Units sold across the period.
    pub total_product_quantity: u32,
    /// Product commission from point-of-sale transactions.
    pub transaction_commission: Decimal,
    /// Sum over worked days of `max(day service commission, daily rate)`.
    pub daily_pay: Decimal,
    /// `daily_pay + transaction_commission`.
    pub gross_pay: Decimal,
    /// Withholding tax on gross pay, per branch settings.
    pub tax_deduction: Decimal,
    /// `gross_pay - tax_deduction`.
    pub net_pay: Decimal,
}

/// Computes a barber's pay from their period activity.
///
/// The steps are:
/// 1. Resolve the barber-level commission rate and daily rate
/// 2. Commission each booking (service overrides apply per booking)
/// 3. Commission each sale line (product settings apply per line)
/// 4. Apply the daily-rate floor per worked day
/// 5. Gross pay = daily pay + product commission
/// 6. Deduct withholding tax per branch settings
pub fn calculate_barber_pay(
    barber_id: &str,
    branch_id: &str,
    bookings: &[Booking],
    sales: &[Sale],
    rates: &RateBook,
    defaults: &EngineDefaults,
) -> PayComputation {
    let barber_rate = resolve_commission_rate(rates, defaults, barber_id, branch_id, None);
    let daily_rate = rates.daily_rate(barber_id);

    let service = calculate_service_commission(barber_id, branch_id, bookings, rates, defaults);
    let products = calculate_product_commission(barber_id, branch_id, sales, rates, defaults);
    let daily = calculate_daily_pay(daily_rate, &service.by_day, &products.by_day);

    let gross_pay = daily.total + products.total;

    let tax_rate = rates
        .settings_for(branch_id)
        .map(|s| s.tax_rate)
        .unwrap_or(Decimal::ZERO);
    let tax_deduction = percent_of(gross_pay, tax_rate);
    let net_pay = gross_pay - tax_deduction;

    PayComputation {
        barber_id: barber_id.to_string(),
        commission_rate: barber_rate.rate,
        daily_rate,
        days_worked: daily.days_worked,
        total_services: service.count,
        service_revenue: round_currency(service.revenue),
        service_commission: round_currency(service.total),
        product_revenue: round_currency(products.revenue),
        total_product_quantity: products.quantity,
        transaction_commission: round_currency(products.total),
        daily_pay: round_currency(daily.total),
        gross_pay: round_currency(gross_pay),
        tax_deduction: round_currency(tax_deduction),
        net_pay: round_currency(net_pay),
    }
}
