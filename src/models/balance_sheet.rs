//! Balance sheet entities: assets, liabilities, equity entries, and the
//! aggregated summary with its financial ratios.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Broad classification of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    /// Convertible to cash within a year.
    Current,
    /// Long-lived physical assets.
    Fixed,
    /// Non-physical assets such as software.
    Intangible,
}

/// Fine-grained asset category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum AssetCategory {
    Cash,
    BankAccounts,
    AccountsReceivable,
    Inventory,
    PrepaidExpenses,
    Equipment,
    Furniture,
    LeaseholdImprovements,
    Vehicles,
    Software,
    Deposits,
    Other,
}

impl AssetCategory {
    /// Whether amounts in this category are derived by the engine rather
    /// than taken from manual rows (cash and inventory come from the
    /// operating ledger; manual rows in these categories are kept for
    /// record-keeping only).
    pub fn is_derived(&self) -> bool {
        matches!(
            self,
            AssetCategory::Cash | AssetCategory::BankAccounts | AssetCategory::Inventory
        )
    }
}

/// A manually tracked asset row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique asset ID.
    pub id: String,
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
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Broad classification of a liability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiabilityType {
    /// Due within a year.
    Current,
    /// Due beyond a year.
    LongTerm,
}

/// Fine-grained liability category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum LiabilityCategory {
    AccountsPayable,
    WagesPayable,
    TaxesPayable,
    UnearnedRevenue,
    CreditCard,
    ShortTermLoan,
    AccruedExpenses,
    BankLoan,
    EquipmentFinancing,
    LeaseObligations,
    OwnerLoan,
    Other,
}

/// A manually tracked liability row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Liability {
    /// Unique liability ID.
    pub id: String,
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
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Kind of equity entry.
///
/// `RetainedEarnings` exists only as a derived figure; manual rows of this
/// kind are rejected at the store boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum EquityType {
    OwnerCapital,
    RetainedEarnings,
    Drawings,
    AdditionalInvestment,
    Other,
}

/// A manually tracked equity row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityEntry {
    /// Unique entry ID.
    pub id: String,
    /// The branch the entry belongs to.
    pub branch_id: String,
    /// Display name.
    pub name: String,
    /// Kind of equity.
    pub equity_type: EquityType,
    /// Entry amount (drawings are recorded as negative amounts).
    pub amount: Decimal,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Health band for a financial ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioStatus {
    /// Comfortable.
    Good,
    /// Worth watching.
    Warning,
    /// Needs attention.
    Danger,
}

impl RatioStatus {
    /// Band for the current ratio: >= 2 good, >= 1 warning, below danger.
    /// A missing ratio (no current liabilities) is good.
    pub fn for_current_ratio(ratio: Option<Decimal>) -> Self {
        match ratio {
            None => RatioStatus::Good,
            Some(r) if r >= Decimal::from(2) => RatioStatus::Good,
            Some(r) if r >= Decimal::ONE => RatioStatus::Warning,
            Some(_) => RatioStatus::Danger,
        }
    }

    /// Band for debt-to-equity: <= 1 good, <= 2 warning, above danger.
    /// A missing ratio (no equity) is danger.
    pub fn for_debt_to_equity(ratio: Option<Decimal>) -> Self {
        match ratio {
            None => RatioStatus::Danger,
            Some(r) if r <= Decimal::ONE => RatioStatus::Good,
            Some(r) if r <= Decimal::from(2) => RatioStatus::Warning,
            Some(_) => RatioStatus::Danger,
        }
    }
}

/// Asset side of a balance sheet summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetsSection {
    /// Derived cash and equivalents (cumulative revenue - expenses).
    pub cash_and_equivalents: Decimal,
    /// Derived inventory value from the operating ledger.
    pub inventory: Decimal,
    /// Manual non-derived current assets (receivables, prepaid, etc.).
    pub manual_current: Decimal,
    /// Total current assets.
    pub current: Decimal,
    /// Fixed assets.
    pub fixed: Decimal,
    /// Intangible assets.
    pub intangible: Decimal,
    /// Total assets.
    pub total: Decimal,
}

/// Liability side of a balance sheet summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiabilitiesSection {
    /// Current liabilities.
    pub current: Decimal,
    /// Long-term liabilities.
    pub long_term: Decimal,
    /// Total liabilities.
    pub total: Decimal,
}

/// Equity side of a balance sheet summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquitySection {
    /// Sum of manual equity entries.
    pub manual_total: Decimal,
    /// Derived retained earnings (cumulative revenue - expenses).
    pub retained_earnings: Decimal,
    /// Total equity.
    pub total: Decimal,
}

/// Liquidity and leverage ratios with their health bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialRatios {
    /// `current_assets - current_liabilities`.
    pub working_capital: Decimal,
    /// Current assets over current liabilities.
    pub current_ratio: Option<Decimal>,
    /// Health band for the current ratio.
    pub current_ratio_status: RatioStatus,
    /// Current ratio with inventory excluded.
    pub quick_ratio: Option<Decimal>,
    /// Total liabilities over total equity.
    pub debt_to_equity_ratio: Option<Decimal>,
    /// Health band for debt-to-equity.
    pub debt_to_equity_status: RatioStatus,
}

/// A branch's financial position at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetSummary {
    /// The branch summarized.
    pub branch_id: String,
    /// The date the figures describe.
    pub as_of: NaiveDate,
    /// Asset totals.
    pub assets: AssetsSection,
    /// Liability totals.
    pub liabilities: LiabilitiesSection,
    /// Equity totals.
    pub equity: EquitySection,
    /// Revenue to date.
    pub revenue_to_date: Decimal,
    /// Expenses to date.
    pub expenses_to_date: Decimal,
    /// Ratios and working capital.
    pub ratios: FinancialRatios,
    /// Whether assets equal liabilities plus equity within tolerance.
    pub is_balanced: bool,
    /// `total_assets - (total_liabilities + total_equity)`.
    pub balance_difference: Decimal,
}
