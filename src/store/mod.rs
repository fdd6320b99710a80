//! In-memory store for every entity the engine owns.
//!
//! Managers validate a whole mutation against this store before writing
//! anything, so a failed operation leaves no partial state behind.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    round_currency, validate_non_negative, AccountingPeriod, Asset, AssetCategory, AssetType,
    BalanceSheetRecord, EquityEntry, EquityType, Liability, LiabilityCategory, LiabilityType,
    PayrollAdjustment, PayrollPeriod, PayrollRecord, RateBook, ReopenAuditEntry,
};

/// The engine's entity store.
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    pub(crate) payroll_periods: HashMap<String, PayrollPeriod>,
    pub(crate) payroll_records: HashMap<String, PayrollRecord>,
    pub(crate) adjustments: Vec<PayrollAdjustment>,
    pub(crate) accounting_periods: HashMap<String, AccountingPeriod>,
    pub(crate) assets: HashMap<String, Asset>,
    pub(crate) liabilities: HashMap<String, Liability>,
    pub(crate) equity_entries: HashMap<String, EquityEntry>,
    pub(crate) rates: RateBook,
    pub(crate) reopen_audit: Vec<ReopenAuditEntry>,
    pub(crate) balance_sheet_records: Vec<BalanceSheetRecord>,
}

impl LedgerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a fresh entity ID.
    pub(crate) fn new_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Returns the rate book.
    pub fn rates(&self) -> &RateBook {
        &self.rates
    }

    /// Returns the rate book for mutation.
    pub fn rates_mut(&mut self) -> &mut RateBook {
        &mut self.rates
    }

    // ----- payroll lookups -----

    /// Looks up a payroll period.
    pub fn payroll_period(&self, id: &str) -> Option<&PayrollPeriod> {
        self.payroll_periods.get(id)
    }

    /// Returns a branch's payroll periods, newest first.
    pub fn payroll_periods_for_branch(&self, branch_id: &str) -> Vec<PayrollPeriod> {
        let mut periods: Vec<PayrollPeriod> = self
            .payroll_periods
            .values()
            .filter(|p| p.branch_id == branch_id)
            .cloned()
            .collect();
        periods.sort_by(|a, b| b.range.start_date.cmp(&a.range.start_date));
        periods
    }

    /// Looks up a payroll record.
    pub fn payroll_record(&self, id: &str) -> Option<&PayrollRecord> {
        self.payroll_records.get(id)
    }

    /// Returns a period's payroll records, ordered by barber name.
    pub fn records_for_period(&self, period_id: &str) -> Vec<PayrollRecord> {
        let mut records: Vec<PayrollRecord> = self
            .payroll_records
            .values()
            .filter(|r| r.period_id == period_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.barber_name.cmp(&b.barber_name));
        records
    }

    /// Returns the adjustments applied to a payroll record.
    pub fn adjustments_for_record(&self, record_id: &str) -> Vec<PayrollAdjustment> {
        self.adjustments
            .iter()
            .filter(|a| a.record_id == record_id)
            .cloned()
            .collect()
    }

    // ----- accounting lookups -----

    /// Looks up an accounting period.
    pub fn accounting_period(&self, id: &str) -> Option<&AccountingPeriod> {
        self.accounting_periods.get(id)
    }

    /// Returns a branch's accounting periods, newest first.
    pub fn accounting_periods_for_branch(&self, branch_id: &str) -> Vec<AccountingPeriod> {
        let mut periods: Vec<AccountingPeriod> = self
            .accounting_periods
            .values()
            .filter(|p| p.branch_id == branch_id)
            .cloned()
            .collect();
        periods.sort_by(|a, b| b.range.start_date.cmp(&a.range.start_date));
        periods
    }

    /// Returns the reopen audit trail for a period, oldest first.
    pub fn reopen_audit_for(&self, period_id: &str) -> Vec<ReopenAuditEntry> {
        self.reopen_audit
            .iter()
            .filter(|e| e.period_id == period_id)
            .cloned()
            .collect()
    }

    /// Returns a branch's saved balance-sheet records, oldest first.
    pub fn balance_records_for_branch(&self, branch_id: &str) -> Vec<BalanceSheetRecord> {
        self.balance_sheet_records
            .iter()
            .filter(|r| r.branch_id == branch_id)
            .cloned()
            .collect()
    }

    // ----- asset CRUD -----

    /// Returns a branch's asset rows.
    pub fn assets_for_branch(&self, branch_id: &str) -> Vec<Asset> {
        let mut assets: Vec<Asset> = self
            .assets
            .values()
            .filter(|a| a.branch_id == branch_id)
            .cloned()
            .collect();
        assets.sort_by(|a, b| a.name.cmp(&b.name));
        assets
    }

    /// Adds an asset row.
    pub fn add_asset(
        &mut self,
        branch_id: &str,
        name: &str,
        asset_type: AssetType,
        category: AssetCategory,
        amount: Decimal,
    ) -> LedgerResult<Asset> {
        validate_non_negative("amount", amount)?;
        let now = Utc::now();
        let asset = Asset {
            id: Self::new_id(),
            branch_id: branch_id.to_string(),
            name: name.to_string(),
            asset_type,
            category,
            amount: round_currency(amount),
            created_at: now,
            updated_at: now,
        };
        self.assets.insert(asset.id.clone(), asset.clone());
        Ok(asset)
    }

    /// Replaces an asset row's mutable fields.
    pub fn update_asset(
        &mut self,
        id: &str,
        name: &str,
        asset_type: AssetType,
        category: AssetCategory,
        amount: Decimal,
    ) -> LedgerResult<Asset> {
        validate_non_negative("amount", amount)?;
        let asset = self
            .assets
            .get_mut(id)
            .ok_or_else(|| LedgerError::EntryNotFound { id: id.to_string() })?;
        asset.name = name.to_string();
        asset.asset_type = asset_type;
        asset.category = category;
        asset.amount = round_currency(amount);
        asset.updated_at = Utc::now();
        Ok(asset.clone())
    }

    /// Deletes an asset row.
    pub fn delete_asset(&mut self, id: &str) -> LedgerResult<()> {
        self.assets
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::EntryNotFound { id: id.to_string() })
    }

    // ----- liability CRUD -----

    /// Returns a branch's liability rows.
    pub fn liabilities_for_branch(&self, branch_id: &str) -> Vec<Liability> {
        let mut liabilities: Vec<Liability> = self
            .liabilities
            .values()
            .filter(|l| l.branch_id == branch_id)
            .cloned()
            .collect();
        liabilities.sort_by(|a, b| a.name.cmp(&b.name));
        liabilities
    }

    /// Adds a liability row.
    pub fn add_liability(
        &mut self,
        branch_id: &str,
        name: &str,
        liability_type: LiabilityType,
        category: LiabilityCategory,
        balance: Decimal,
    ) -> LedgerResult<Liability> {
        validate_non_negative("balance", balance)?;
        let now = Utc::now();
        let liability = Liability {
            id: Self::new_id(),
            branch_id: branch_id.to_string(),
            name: name.to_string(),
            liability_type,
            category,
            balance: round_currency(balance),
            created_at: now,
            updated_at: now,
        };
        self.liabilities
            .insert(liability.id.clone(), liability.clone());
        Ok(liability)
    }

    /// Replaces a liability row's mutable fields.
    pub fn update_liability(
        &mut self,
        id: &str,
        name: &str,
        liability_type: LiabilityType,
        category: LiabilityCategory,
        balance: Decimal,
    ) -> LedgerResult<Liability> {
        validate_non_negative("balance", balance)?;
        let liability = self
            .liabilities
            .get_mut(id)
            .ok_or_else(|| LedgerError::EntryNotFound { id: id.to_string() })?;
        liability.name = name.to_string();
        liability.liability_type = liability_type;
        liability.category = category;
        liability.balance = round_currency(balance);
        liability.updated_at = Utc::now();
        Ok(liability.clone())
    }

    /// Deletes a liability row.
    pub fn delete_liability(&mut self, id: &str) -> LedgerResult<()> {
        self.liabilities
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::EntryNotFound { id: id.to_string() })
    }

    // ----- equity CRUD -----

    /// Returns a branch's equity rows.
    pub fn equity_for_branch(&self, branch_id: &str) -> Vec<EquityEntry> {
        let mut entries: Vec<EquityEntry> = self
            .equity_entries
            .values()
            .filter(|e| e.branch_id == branch_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    /// Adds an equity row. Retained earnings are derived, never manual;
    /// drawings reduce equity and must carry a negative amount.
    pub fn add_equity(
        &mut self,
        branch_id: &str,
        name: &str,
        equity_type: EquityType,
        amount: Decimal,
    ) -> LedgerResult<EquityEntry> {
        Self::reject_retained_earnings(equity_type)?;
        Self::reject_positive_drawings(equity_type, amount)?;
        let now = Utc::now();
        let entry = EquityEntry {
            id: Self::new_id(),
            branch_id: branch_id.to_string(),
            name: name.to_string(),
            equity_type,
            amount: round_currency(amount),
            created_at: now,
            updated_at: now,
        };
        self.equity_entries.insert(entry.id.clone(), entry.clone());
        Ok(entry)
    }

    /// Replaces an equity row's mutable fields.
    pub fn update_equity(
        &mut self,
        id: &str,
        name: &str,
        equity_type: EquityType,
        amount: Decimal,
    ) -> LedgerResult<EquityEntry> {
        Self::reject_retained_earnings(equity_type)?;
        Self::reject_positive_drawings(equity_type, amount)?;
        let entry = self
            .equity_entries
            .get_mut(id)
            .ok_or_else(|| LedgerError::EntryNotFound { id: id.to_string() })?;
        entry.name = name.to_string();
        entry.equity_type = equity_type;
        entry.amount = round_currency(amount);
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    /// Deletes an equity row.
    pub fn delete_equity(&mut self, id: &str) -> LedgerResult<()> {
        self.equity_entries
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::EntryNotFound { id: id.to_string() })
    }

    fn reject_retained_earnings(equity_type: EquityType) -> LedgerResult<()> {
        if equity_type == EquityType::RetainedEarnings {
            return Err(LedgerError::InvalidInput {
                field: "equity_type".to_string(),
                message: "retained earnings are derived from operations and cannot be entered manually"
                    .to_string(),
            });
        }
        Ok(())
    }

    fn reject_positive_drawings(equity_type: EquityType, amount: Decimal) -> LedgerResult<()> {
        if equity_type == EquityType::Drawings && amount > Decimal::ZERO {
            return Err(LedgerError::InvalidInput {
                field: "amount".to_string(),
                message: "drawings reduce equity and are recorded as negative amounts".to_string(),
            });
        }
        Ok(())
    }
}
