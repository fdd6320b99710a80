//! Calculation logic for the ledger engine.
//!
//! This module contains the pure calculation functions for determining
//! barber pay: commission rate resolution, service commission from
//! bookings, product commission from point-of-sale transactions, the
//! per-day daily-rate floor, and the orchestration that assembles a full
//! pay computation.

mod barber_pay;
mod daily_pay;
mod product_commission;
mod rate_resolution;
mod service_commission;

pub use barber_pay::{PayComputation, calculate_barber_pay};
pub use daily_pay::{DailyPayResult, calculate_daily_pay};
pub use product_commission::{ProductCommissionResult, calculate_product_commission};
pub use rate_resolution::{RateSource, ResolvedRate, resolve_commission_rate};
pub use service_commission::{ServiceCommissionResult, calculate_service_commission};
