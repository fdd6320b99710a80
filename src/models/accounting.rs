//! Accounting period, snapshot, and audit models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::activity::DateRange;

/// Lifecycle state of an accounting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountingPeriodStatus {
    /// Active; figures still move.
    Open,
    /// Under review ahead of closing.
    Closing,
    /// Frozen with a snapshot.
    Closed,
}

/// Span covered by an accounting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountingPeriodType {
    /// One calendar month.
    Monthly,
    /// One quarter.
    Quarterly,
    /// One fiscal year.
    Yearly,
}

/// The frozen financial position captured when a period closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetSnapshot {
    /// Total assets at period end.
    pub total_assets: Decimal,
    /// Total liabilities at period end.
    pub total_liabilities: Decimal,
    /// Total equity at period end.
    pub total_equity: Decimal,
    /// Current assets at period end.
    pub current_assets: Decimal,
    /// Fixed assets at period end.
    pub fixed_assets: Decimal,
    /// Intangible assets at period end.
    pub intangible_assets: Decimal,
    /// Current liabilities at period end.
    pub current_liabilities: Decimal,
    /// Long-term liabilities at period end.
    pub long_term_liabilities: Decimal,
    /// Retained earnings derived from cumulative operations.
    pub retained_earnings: Decimal,
    /// Cash and equivalents at period end.
    pub cash_and_equivalents: Decimal,
    /// Inventory value at period end.
    pub inventory_value: Decimal,
    /// Revenue earned within the period.
    pub revenue: Decimal,
    /// Expenses incurred within the period.
    pub expenses: Decimal,
    /// `revenue - expenses` for the period.
    pub net_income: Decimal,
    /// `current_assets - current_liabilities` at period end.
    pub working_capital: Decimal,
    /// Current ratio, when current liabilities are non-zero.
    pub current_ratio: Option<Decimal>,
    /// Debt-to-equity ratio, when equity is non-zero.
    pub debt_to_equity_ratio: Option<Decimal>,
}

/// An accounting period for a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountingPeriod {
    /// Unique period ID.
    pub id: String,
    /// The branch this period belongs to.
    pub branch_id: String,
    /// Display name (e.g., "March 2025").
    pub name: String,
    /// Span covered.
    pub period_type: AccountingPeriodType,
    /// The inclusive date range the period covers.
    #[serde(flatten)]
    pub range: DateRange,
    /// Lifecycle state.
    pub status: AccountingPeriodStatus,
    /// Frozen snapshot; present only while the period is closed.
    pub snapshot: Option<BalanceSheetSnapshot>,
    /// When the period was closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Who closed the period.
    pub closed_by: Option<String>,
    /// Free-form notes recorded at close time.
    pub notes: Option<String>,
    /// When the period was created.
    pub created_at: DateTime<Utc>,
}

/// An append-only audit entry recorded when a closed period is reopened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReopenAuditEntry {
    /// The period that was reopened.
    pub period_id: String,
    /// The stated reason for reopening.
    pub reason: String,
    /// Who reopened the period.
    pub reopened_by: String,
    /// When the reopen happened.
    pub timestamp: DateTime<Utc>,
}

/// A dated balance-sheet record kept for trend history.
///
/// Appended when a period closes and on explicit snapshot requests;
/// distinct from the frozen period snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetRecord {
    /// Unique record ID.
    pub id: String,
    /// The branch the record belongs to.
    pub branch_id: String,
    /// The date the figures describe.
    pub as_of: NaiveDate,
    /// Total assets.
    pub total_assets: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Total equity.
    pub total_equity: Decimal,
    /// `current_assets - current_liabilities`.
    pub working_capital: Decimal,
    /// Whether the accounting equation held within tolerance.
    pub is_balanced: bool,
    /// Free-form note (e.g., which period close produced it).
    pub notes: Option<String>,
    /// When the record was written.
    pub created_at: DateTime<Utc>,
}
