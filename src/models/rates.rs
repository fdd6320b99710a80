//! Commission rates, daily rates, product share settings, and payroll
//! settings, together with the [`RateBook`] that owns them.
//!
//! Every table in the rate book keeps exactly one active row per key;
//! setting a rate replaces the previous row rather than accumulating
//! versions that need scanning.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{LedgerError, LedgerResult};

use super::money::validate_percent;

/// A commission rate override for a specific service within a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCommissionRate {
    /// The branch this override belongs to.
    pub branch_id: String,
    /// The service the rate applies to.
    pub service_id: String,
    /// Commission rate in percent (0-100).
    pub rate: Decimal,
    /// When the rate was last set.
    pub updated_at: DateTime<Utc>,
}

/// A barber-level commission rate override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarberCommissionRate {
    /// The barber the rate applies to.
    pub barber_id: String,
    /// Commission rate in percent (0-100).
    pub rate: Decimal,
    /// When the rate was last set.
    pub updated_at: DateTime<Utc>,
}

/// A guaranteed daily rate for a barber.
///
/// On each worked day the barber earns at least this amount, regardless
/// of how little service commission the day produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarberDailyRate {
    /// The barber the rate applies to.
    pub barber_id: String,
    /// Guaranteed pay per worked day.
    pub daily_rate: Decimal,
    /// When the rate was last set.
    pub updated_at: DateTime<Utc>,
}

/// How a product's commission share is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "share_type", content = "value")]
pub enum ProductShare {
    /// Percent of the line revenue (0-100).
    Percentage(Decimal),
    /// Fixed amount per unit sold.
    FixedPerUnit(Decimal),
}

/// Commission setting for a specific product within a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCommissionSetting {
    /// The branch this setting belongs to.
    pub branch_id: String,
    /// The product the setting applies to.
    pub product_id: String,
    /// How the barber's share is computed.
    #[serde(flatten)]
    pub share: ProductShare,
    /// When the setting was last set.
    pub updated_at: DateTime<Utc>,
}

/// How often a branch pays its barbers out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutFrequency {
    /// Every week.
    Weekly,
    /// Every two weeks.
    BiWeekly,
    /// Once a month.
    Monthly,
}

/// Per-branch payroll settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollSettings {
    /// The branch these settings belong to.
    pub branch_id: String,
    /// Default commission rate (percent) for barbers without an override.
    pub default_commission_rate: Decimal,
    /// How often payroll runs.
    pub payout_frequency: PayoutFrequency,
    /// Payout day: weekday 0-6 for weekly, day-of-month 1-31 for monthly.
    pub payout_day: u8,
    /// Withholding tax rate in percent (0-100).
    pub tax_rate: Decimal,
    /// When the settings were last updated.
    pub updated_at: DateTime<Utc>,
}

impl PayrollSettings {
    /// Validates the commission rate, tax rate, and payout day.
    pub fn validate(&self) -> LedgerResult<()> {
        validate_percent("default_commission_rate", self.default_commission_rate)?;
        validate_percent("tax_rate", self.tax_rate)?;

        match self.payout_frequency {
            PayoutFrequency::Weekly if self.payout_day > 6 => Err(LedgerError::InvalidInput {
                field: "payout_day".to_string(),
                message: "weekly payout day must be between 0 (Sunday) and 6 (Saturday)"
                    .to_string(),
            }),
            PayoutFrequency::Monthly if !(1..=31).contains(&self.payout_day) => {
                Err(LedgerError::InvalidInput {
                    field: "payout_day".to_string(),
                    message: "monthly payout day must be between 1 and 31".to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// The branch rate book: one active row per key for every rate table.
#[derive(Debug, Clone, Default)]
pub struct RateBook {
    service_rates: HashMap<(String, String), ServiceCommissionRate>,
    barber_rates: HashMap<String, BarberCommissionRate>,
    daily_rates: HashMap<String, BarberDailyRate>,
    product_settings: HashMap<(String, String), ProductCommissionSetting>,
    payroll_settings: HashMap<String, PayrollSettings>,
}

impl RateBook {
    /// Creates an empty rate book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the commission rate for a service, replacing any previous rate.
    pub fn set_service_rate(&mut self, rate: ServiceCommissionRate) -> LedgerResult<()> {
        validate_percent("rate", rate.rate)?;
        self.service_rates
            .insert((rate.branch_id.clone(), rate.service_id.clone()), rate);
        Ok(())
    }

    /// Looks up the active commission rate for a service.
    pub fn service_rate(&self, branch_id: &str, service_id: &str) -> Option<Decimal> {
        self.service_rates
            .get(&(branch_id.to_string(), service_id.to_string()))
            .map(|r| r.rate)
    }

    /// Sets a barber's commission rate, replacing any previous rate.
    pub fn set_barber_rate(&mut self, rate: BarberCommissionRate) -> LedgerResult<()> {
        validate_percent("rate", rate.rate)?;
        self.barber_rates.insert(rate.barber_id.clone(), rate);
        Ok(())
    }

    /// Looks up a barber's active commission rate.
    pub fn barber_rate(&self, barber_id: &str) -> Option<Decimal> {
        self.barber_rates.get(barber_id).map(|r| r.rate)
    }

    /// Sets a barber's guaranteed daily rate, replacing any previous rate.
    pub fn set_daily_rate(&mut self, rate: BarberDailyRate) -> LedgerResult<()> {
        if rate.daily_rate < Decimal::ZERO {
            return Err(LedgerError::InvalidInput {
                field: "daily_rate".to_string(),
                message: "cannot be negative".to_string(),
            });
        }
        self.daily_rates.insert(rate.barber_id.clone(), rate);
        Ok(())
    }

    /// Looks up a barber's guaranteed daily rate, defaulting to zero.
    pub fn daily_rate(&self, barber_id: &str) -> Decimal {
        self.daily_rates
            .get(barber_id)
            .map(|r| r.daily_rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Sets the commission share for a product, replacing any previous one.
    pub fn set_product_setting(&mut self, setting: ProductCommissionSetting) -> LedgerResult<()> {
        match setting.share {
            ProductShare::Percentage(rate) => validate_percent("rate", rate)?,
            ProductShare::FixedPerUnit(amount) => {
                if amount < Decimal::ZERO {
                    return Err(LedgerError::InvalidInput {
                        field: "fixed_amount".to_string(),
                        message: "cannot be negative".to_string(),
                    });
                }
            }
        }
        self.product_settings.insert(
            (setting.branch_id.clone(), setting.product_id.clone()),
            setting,
        );
        Ok(())
    }

    /// Looks up the active commission setting for a product.
    pub fn product_setting(
        &self,
        branch_id: &str,
        product_id: &str,
    ) -> Option<&ProductCommissionSetting> {
        self.product_settings
            .get(&(branch_id.to_string(), product_id.to_string()))
    }

    /// Creates or replaces the payroll settings for a branch.
    pub fn upsert_payroll_settings(&mut self, settings: PayrollSettings) -> LedgerResult<()> {
        settings.validate()?;
        self.payroll_settings
            .insert(settings.branch_id.clone(), settings);
        Ok(())
    }

    /// Looks up the payroll settings for a branch.
    pub fn settings_for(&self, branch_id: &str) -> Option<&PayrollSettings> {
        self.payroll_settings.get(branch_id)
    }
}
