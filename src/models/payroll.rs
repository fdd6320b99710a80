//! Payroll period, record, and adjustment models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::activity::DateRange;

/// Lifecycle state of a payroll period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollPeriodStatus {
    /// Created but not yet calculated.
    Draft,
    /// Records have been computed; recalculation is still allowed.
    Calculated,
    /// Paid out; the period and its records are frozen.
    Paid,
}

/// Cadence of a payroll period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollPeriodType {
    /// A one-week period.
    Weekly,
    /// A two-week period.
    BiWeekly,
    /// A calendar-month period.
    Monthly,
}

/// A payroll period for a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Unique period ID.
    pub id: String,
    /// The branch this period belongs to.
    pub branch_id: String,
    /// The inclusive date range the period covers.
    #[serde(flatten)]
    pub range: DateRange,
    /// Period cadence.
    pub period_type: PayrollPeriodType,
    /// Lifecycle state.
    pub status: PayrollPeriodStatus,
    /// Sum of gross pay across all records.
    pub total_earnings: Decimal,
    /// Sum of raw commission (service + product) across all records.
    pub total_commissions: Decimal,
    /// Sum of deductions across all records.
    pub total_deductions: Decimal,
    /// When the period was created.
    pub created_at: DateTime<Utc>,
    /// When the period was last calculated.
    pub calculated_at: Option<DateTime<Utc>>,
    /// When the period was marked paid.
    pub paid_at: Option<DateTime<Utc>>,
}

/// Payment state of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollRecordStatus {
    /// Computed and awaiting payout.
    Calculated,
    /// Paid out; the record is frozen.
    Paid,
}

/// How a payroll record was paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash payout.
    Cash,
    /// Bank transfer.
    BankTransfer,
    /// Paper check.
    Check,
    /// GCash or similar e-wallet.
    DigitalWallet,
}

/// One barber's computed pay within a payroll period.
///
/// All rate inputs are frozen into the record at calculation time so the
/// record stays meaningful after the rate book changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique record ID.
    pub id: String,
    /// The parent payroll period.
    pub period_id: String,
    /// The barber the record belongs to.
    pub barber_id: String,
    /// Barber display name at calculation time.
    pub barber_name: String,
    /// The barber-level commission rate in effect (percent).
    pub commission_rate: Decimal,
    /// The guaranteed daily rate in effect.
    pub daily_rate: Decimal,
    /// Distinct days with at least one qualifying booking or sale.
    pub days_worked: u32,
    /// Number of completed bookings in the period.
    pub total_services: u32,
    /// Service revenue across the period.
    pub total_service_revenue: Decimal,
    /// Units sold across the period.
    pub total_product_quantity: u32,
    /// Raw service commission before the daily-rate floor.
    pub service_commission: Decimal,
    /// Product commission from point-of-sale transactions.
    pub transaction_commission: Decimal,
    /// Sum over worked days of `max(day service commission, daily rate)`.
    pub daily_pay: Decimal,
    /// `daily_pay + transaction_commission`.
    pub gross_pay: Decimal,
    /// Withholding tax deducted from gross pay.
    pub tax_deduction: Decimal,
    /// Other deductions (adjustments accumulate here).
    pub other_deductions: Decimal,
    /// Final take-home pay.
    pub net_pay: Decimal,
    /// Payment state.
    pub status: PayrollRecordStatus,
    /// When the record was paid.
    pub paid_at: Option<DateTime<Utc>>,
    /// How the record was paid.
    pub payment_method: Option<PaymentMethod>,
    /// External payment reference.
    pub payment_reference: Option<String>,
    /// Free-form payout notes.
    pub notes: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// Kind of manual payroll adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// Extra pay on top of the computed amount.
    Bonus,
    /// Pay withheld from the computed amount.
    Deduction,
    /// Signed correction of a calculation mistake.
    Correction,
}

/// A manual adjustment applied to a payroll record's net pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollAdjustment {
    /// Unique adjustment ID.
    pub id: String,
    /// The record the adjustment applies to.
    pub record_id: String,
    /// Kind of adjustment.
    pub kind: AdjustmentKind,
    /// Adjustment amount. Positive for bonus/deduction; corrections carry
    /// their own sign.
    pub amount: Decimal,
    /// Why the adjustment was made.
    pub reason: String,
    /// When the adjustment was applied.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_period_serializes_flattened_range() {
        let period = PayrollPeriod {
            id: "per_001".to_string(),
            branch_id: "branch_1".to_string(),
            range: DateRange::new(
                NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
            )
            .unwrap(),
            period_type: PayrollPeriodType::BiWeekly,
            status: PayrollPeriodStatus::Draft,
            total_earnings: Decimal::ZERO,
            total_commissions: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            created_at: Utc::now(),
            calculated_at: None,
            paid_at: None,
        };

        let json = serde_json::to_string(&period).unwrap();
        assert!(json.contains("\"start_date\":\"2025-03-01\""));
        assert!(json.contains("\"end_date\":\"2025-03-15\""));
        assert!(json.contains("\"status\":\"draft\""));
        assert!(json.contains("\"period_type\":\"bi_weekly\""));
    }

    #[test]
    fn test_payment_method_snake_case() {
        let json = serde_json::to_string(&PaymentMethod::BankTransfer).unwrap();
        assert_eq!(json, "\"bank_transfer\"");

        let method: PaymentMethod = serde_json::from_str("\"digital_wallet\"").unwrap();
        assert_eq!(method, PaymentMethod::DigitalWallet);
    }

    #[test]
    fn test_adjustment_kind_roundtrip() {
        let kind: AdjustmentKind = serde_json::from_str("\"correction\"").unwrap();
        assert_eq!(kind, AdjustmentKind::Correction);
    }

    #[test]
    fn test_record_status_serializes() {
        assert_eq!(
            serde_json::to_string(&PayrollRecordStatus::Calculated).unwrap(),
            "\"calculated\""
        );
        assert_eq!(dec("475.00"), dec("475"));
    }
}
