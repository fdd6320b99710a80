//! Core data models for the ledger engine.
//!
//! This module contains all the domain models used throughout the engine.

mod accounting;
mod activity;
mod balance_sheet;
mod money;
mod payroll;
mod rates;

pub use accounting::{
    AccountingPeriod, AccountingPeriodStatus, AccountingPeriodType, BalanceSheetRecord,
    BalanceSheetSnapshot, ReopenAuditEntry,
};
pub use activity::{Booking, DateRange, PnlFigures, Sale, SaleLine};
pub use balance_sheet::{
    Asset, AssetCategory, AssetType, AssetsSection, BalanceSheetSummary, EquityEntry,
    EquitySection, EquityType, FinancialRatios, LiabilitiesSection, Liability, LiabilityCategory,
    LiabilityType, RatioStatus,
};
pub use money::{percent_of, round_currency, validate_non_negative, validate_percent};
pub use payroll::{
    AdjustmentKind, PaymentMethod, PayrollAdjustment, PayrollPeriod, PayrollPeriodStatus,
    PayrollPeriodType, PayrollRecord, PayrollRecordStatus,
};
pub use rates::{
    BarberCommissionRate, BarberDailyRate, PayoutFrequency, PayrollSettings,
    ProductCommissionSetting, ProductShare, RateBook, ServiceCommissionRate,
};
