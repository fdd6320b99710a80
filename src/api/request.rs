//! Request types for the ledger engine API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{
    AccountingPeriodStatus, AccountingPeriodType, AdjustmentKind, AssetCategory, AssetType,
    EquityType, LiabilityCategory, LiabilityType, PaymentMethod, PayoutFrequency,
    PayrollPeriodType, ProductShare,
};

/// Body for creating a payroll period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePayrollPeriodRequest {
    /// The branch the period belongs to.
    pub branch_id: String,
    /// Inclusive start date.
    pub start_date: NaiveDate,
    /// Inclusive end date.
    pub end_date: NaiveDate,
    /// Period cadence.
    pub period_type: PayrollPeriodType,
}

/// Body for marking a payroll record paid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayRecordRequest {
    /// How the record was paid out.
    pub payment_method: PaymentMethod,
    /// External payment reference.
    #[serde(default)]
    pub payment_reference: Option<String>,
    /// Free-form payout notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body for applying a manual adjustment to a payroll record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentRequest {
    /// Kind of adjustment.
    pub kind: AdjustmentKind,
    /// Adjustment amount.
    pub amount: Decimal,
    /// Why the adjustment was made.
    pub reason: String,
}

/// Body for setting a service commission rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRateRequest {
    /// The branch the override belongs to.
    pub branch_id: String,
    /// The service the rate applies to.
    pub service_id: String,
    /// Commission rate in percent.
    pub rate: Decimal,
}

/// Body for setting a barber commission rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarberRateRequest {
    /// The barber the rate applies to.
    pub barber_id: String,
    /// Commission rate in percent.
    pub rate: Decimal,
}

/// Body for setting a barber's guaranteed daily rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRateRequest {
    /// The barber the rate applies to.
    pub barber_id: String,
    /// Guaranteed pay per worked day.
    pub daily_rate: Decimal,
}

/// Body for setting a product commission share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSettingRequest {
    /// The branch the setting belongs to.
    pub branch_id: String,
    /// The product the setting applies to.
    pub product_id: String,
    /// How the barber's share is computed.
    #[serde(flatten)]
    pub share: ProductShare,
}

/// Body for upserting a branch's payroll settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollSettingsRequest {
    /// The branch the settings belong to.
    pub branch_id: String,
    /// Default commission rate in percent.
    pub default_commission_rate: Decimal,
    /// Payout cadence.
    pub payout_frequency: PayoutFrequency,
    /// Payout day within the cadence.
    pub payout_day: u8,
    /// Withholding tax rate in percent.
    pub tax_rate: Decimal,
}

/// Body for creating or updating an asset row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRequest {
    /// The branch the asset belongs to.
    pub branch_id: String,
    /// Display name.
    pub name: String,
    /// Broad classification.
    pub asset_type: AssetType,
    /// Fine-grained category.
    pub category: AssetCategory,
    /// Current value.
    pub amount: Decimal,
}

/// Body for creating or updating a liability row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiabilityRequest {
    /// The branch the liability belongs to.
    pub branch_id: String,
    /// Display name.
    pub name: String,
    /// Broad classification.
    pub liability_type: LiabilityType,
    /// Fine-grained category.
    pub category: LiabilityCategory,
    /// Outstanding balance.
    pub balance: Decimal,
}

/// Body for creating or updating an equity row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityRequest {
    /// The branch the entry belongs to.
    pub branch_id: String,
    /// Display name.
    pub name: String,
    /// Kind of equity.
    pub equity_type: EquityType,
    /// Entry amount.
    pub amount: Decimal,
}

/// Body for creating an accounting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountingPeriodRequest {
    /// The branch the period belongs to.
    pub branch_id: String,
    /// Display name.
    pub name: String,
    /// Span covered.
    pub period_type: AccountingPeriodType,
    /// Inclusive start date.
    pub start_date: NaiveDate,
    /// Inclusive end date.
    pub end_date: NaiveDate,
}

/// Body for closing an accounting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosePeriodRequest {
    /// Who is closing the period.
    pub closed_by: String,
    /// Free-form close notes, stored on the period.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body for reopening a closed accounting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReopenPeriodRequest {
    /// The stated reason for reopening.
    pub reason: String,
    /// Who is reopening the period.
    pub reopened_by: String,
}

/// Body for saving a dated balance-sheet record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveBalanceRecordRequest {
    /// The branch to snapshot.
    pub branch_id: String,
    /// The date the figures should describe.
    pub as_of: NaiveDate,
    /// Free-form note.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body for comparing two closed accounting periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparePeriodsRequest {
    /// First period's ID.
    pub period_1_id: String,
    /// Second period's ID.
    pub period_2_id: String,
}

/// Query selecting a branch.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchQuery {
    /// The branch to query.
    pub branch_id: String,
}

/// Query for a balance sheet summary.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryQuery {
    /// The branch to summarize.
    pub branch_id: String,
    /// The date the figures should describe.
    pub as_of: NaiveDate,
}

/// Query for listing accounting periods.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodsQuery {
    /// The branch to query.
    pub branch_id: String,
    /// Optional status filter.
    #[serde(default)]
    pub status: Option<AccountingPeriodStatus>,
}

/// Query for the open accounting period covering a date.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentPeriodQuery {
    /// The branch to query.
    pub branch_id: String,
    /// The date to cover.
    pub on: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_create_payroll_period() {
        let json = r#"{
            "branch_id": "branch_1",
            "start_date": "2025-03-01",
            "end_date": "2025-03-15",
            "period_type": "bi_weekly"
        }"#;
        let request: CreatePayrollPeriodRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.branch_id, "branch_1");
        assert_eq!(request.period_type, PayrollPeriodType::BiWeekly);
    }

    #[test]
    fn test_deserialize_product_setting_flattened_share() {
        let json = r#"{
            "branch_id": "branch_1",
            "product_id": "pomade",
            "share_type": "fixed_per_unit",
            "value": "25"
        }"#;
        let request: ProductSettingRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(request.share, ProductShare::FixedPerUnit(_)));
    }

    #[test]
    fn test_pay_record_defaults_optional_fields() {
        let json = r#"{"payment_method": "cash"}"#;
        let request: PayRecordRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.payment_method, PaymentMethod::Cash);
        assert!(request.payment_reference.is_none());
        assert!(request.notes.is_none());
    }

    #[test]
    fn test_periods_query_status_optional() {
        let query: PeriodsQuery =
            serde_json::from_str(r#"{"branch_id": "branch_1"}"#).unwrap();
        assert!(query.status.is_none());

        let query: PeriodsQuery =
            serde_json::from_str(r#"{"branch_id": "branch_1", "status": "closed"}"#).unwrap();
        assert_eq!(query.status, Some(AccountingPeriodStatus::Closed));
    }
}
