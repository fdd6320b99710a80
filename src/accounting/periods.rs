//! Accounting period lifecycle: open -> closing -> closed, with audited
//! reopening.
//!
//! Closing freezes a snapshot of the branch's position at the period's
//! end date. A close is refused while the sheet is out of balance, so
//! every snapshot on record satisfies the accounting equation.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::config::EngineDefaults;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::OperatingLedger;
use crate::models::{
    round_currency, AccountingPeriod, AccountingPeriodStatus, AccountingPeriodType,
    BalanceSheetSnapshot, DateRange, ReopenAuditEntry,
};
use crate::store::LedgerStore;

use super::balance_sheet::{balance_sheet_summary, save_balance_sheet_record};

/// One metric's values across two compared periods.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MetricComparison {
    /// Metric name.
    pub metric: &'static str,
    /// Value in the first period's snapshot.
    pub value_1: Decimal,
    /// Value in the second period's snapshot.
    pub value_2: Decimal,
    /// `value_2 - value_1`.
    pub change: Decimal,
    /// Percent change relative to the first value; absent when the first
    /// value is zero.
    pub change_percent: Option<Decimal>,
}

/// Snapshot-to-snapshot comparison of two closed periods.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PeriodComparison {
    /// First period's ID.
    pub period_1_id: String,
    /// First period's display name.
    pub period_1_name: String,
    /// Second period's ID.
    pub period_2_id: String,
    /// Second period's display name.
    pub period_2_name: String,
    /// Per-metric deltas.
    pub metrics: Vec<MetricComparison>,
}

/// Creates an open accounting period.
///
/// Unlike payroll periods, accounting periods for a branch may never
/// overlap; the error names the conflicting period.
pub fn create_accounting_period(
    store: &mut LedgerStore,
    branch_id: &str,
    name: &str,
    period_type: AccountingPeriodType,
    range: DateRange,
) -> LedgerResult<AccountingPeriod> {
    if name.trim().is_empty() {
        return Err(LedgerError::InvalidInput {
            field: "name".to_string(),
            message: "period name cannot be empty".to_string(),
        });
    }
    if let Some(existing) = store
        .accounting_periods
        .values()
        .find(|p| p.branch_id == branch_id && p.range.overlaps(&range))
    {
        return Err(LedgerError::PeriodOverlap {
            name: existing.name.clone(),
        });
    }

    let period = AccountingPeriod {
        id: LedgerStore::new_id(),
        branch_id: branch_id.to_string(),
        name: name.trim().to_string(),
        period_type,
        range,
        status: AccountingPeriodStatus::Open,
        snapshot: None,
        closed_at: None,
        closed_by: None,
        notes: None,
        created_at: Utc::now(),
    };
    store
        .accounting_periods
        .insert(period.id.clone(), period.clone());
    Ok(period)
}

/// Moves an open period into the closing review state.
pub fn mark_period_closing(
    store: &mut LedgerStore,
    period_id: &str,
) -> LedgerResult<AccountingPeriod> {
    let period = get_period_mut(store, period_id)?;
    if period.status == AccountingPeriodStatus::Closed {
        return Err(LedgerError::PeriodClosed {
            id: period_id.to_string(),
        });
    }
    period.status = AccountingPeriodStatus::Closing;
    Ok(period.clone())
}

/// Closes an accounting period, freezing its snapshot.
///
/// The snapshot is taken as of the period's end date. Closing fails when
/// the balance sheet is out of balance beyond the configured tolerance;
/// nothing is written in that case.
pub fn close_accounting_period(
    store: &mut LedgerStore,
    operating: &dyn OperatingLedger,
    defaults: &EngineDefaults,
    period_id: &str,
    closed_by: &str,
    notes: Option<String>,
) -> LedgerResult<AccountingPeriod> {
    let period = store
        .accounting_period(period_id)
        .ok_or_else(|| LedgerError::PeriodNotFound {
            id: period_id.to_string(),
        })?
        .clone();
    if period.status == AccountingPeriodStatus::Closed {
        return Err(LedgerError::PeriodClosed {
            id: period_id.to_string(),
        });
    }

    let summary = balance_sheet_summary(
        store,
        operating,
        defaults,
        &period.branch_id,
        period.range.end_date,
    );
    if !summary.is_balanced {
        return Err(LedgerError::OutOfBalance {
            difference: summary.balance_difference,
            tolerance: defaults.balance_epsilon,
        });
    }

    let in_period = operating.figures_in_range(&period.branch_id, &period.range);
    let snapshot = BalanceSheetSnapshot {
        total_assets: summary.assets.total,
        total_liabilities: summary.liabilities.total,
        total_equity: summary.equity.total,
        current_assets: summary.assets.current,
        fixed_assets: summary.assets.fixed,
        intangible_assets: summary.assets.intangible,
        current_liabilities: summary.liabilities.current,
        long_term_liabilities: summary.liabilities.long_term,
        retained_earnings: summary.equity.retained_earnings,
        cash_and_equivalents: summary.assets.cash_and_equivalents,
        inventory_value: summary.assets.inventory,
        revenue: round_currency(in_period.revenue),
        expenses: round_currency(in_period.expenses),
        net_income: round_currency(in_period.net()),
        working_capital: summary.ratios.working_capital,
        current_ratio: summary.ratios.current_ratio,
        debt_to_equity_ratio: summary.ratios.debt_to_equity_ratio,
    };

    save_balance_sheet_record(store, &summary, Some(format!("Period Close: {}", period.name)))?;

    let stored = get_period_mut(store, period_id)?;
    stored.status = AccountingPeriodStatus::Closed;
    stored.snapshot = Some(snapshot);
    stored.closed_at = Some(Utc::now());
    stored.closed_by = Some(closed_by.to_string());
    stored.notes = notes;
    Ok(stored.clone())
}

/// Reopens a closed period, discarding its snapshot.
///
/// A non-empty reason is required and lands in the append-only reopen
/// audit trail.
pub fn reopen_accounting_period(
    store: &mut LedgerStore,
    period_id: &str,
    reason: &str,
    reopened_by: &str,
) -> LedgerResult<AccountingPeriod> {
    if reason.trim().is_empty() {
        return Err(LedgerError::EmptyReopenReason {
            id: period_id.to_string(),
        });
    }
    let period = get_period_mut(store, period_id)?;
    if period.status != AccountingPeriodStatus::Closed {
        return Err(LedgerError::PeriodNotClosed {
            id: period_id.to_string(),
        });
    }

    period.status = AccountingPeriodStatus::Open;
    period.snapshot = None;
    period.closed_at = None;
    period.closed_by = None;
    period.notes = None;
    let reopened = period.clone();

    store.reopen_audit.push(ReopenAuditEntry {
        period_id: period_id.to_string(),
        reason: reason.trim().to_string(),
        reopened_by: reopened_by.to_string(),
        timestamp: Utc::now(),
    });
    Ok(reopened)
}

/// Deletes an accounting period. Closed periods must be reopened first.
pub fn delete_accounting_period(store: &mut LedgerStore, period_id: &str) -> LedgerResult<()> {
    let period = store
        .accounting_period(period_id)
        .ok_or_else(|| LedgerError::PeriodNotFound {
            id: period_id.to_string(),
        })?;
    if period.status == AccountingPeriodStatus::Closed {
        return Err(LedgerError::PeriodClosed {
            id: period_id.to_string(),
        });
    }
    store.accounting_periods.remove(period_id);
    Ok(())
}

/// Returns the open period covering a date, if any.
pub fn current_open_period(
    store: &LedgerStore,
    branch_id: &str,
    on: NaiveDate,
) -> Option<AccountingPeriod> {
    store
        .accounting_periods
        .values()
        .find(|p| {
            p.branch_id == branch_id
                && p.status != AccountingPeriodStatus::Closed
                && p.range.contains(on)
        })
        .cloned()
}

/// Lists a branch's periods, newest first, optionally filtered by status.
pub fn list_accounting_periods(
    store: &LedgerStore,
    branch_id: &str,
    status: Option<AccountingPeriodStatus>,
) -> Vec<AccountingPeriod> {
    store
        .accounting_periods_for_branch(branch_id)
        .into_iter()
        .filter(|p| status.is_none_or(|s| p.status == s))
        .collect()
}

/// Compares two closed periods' snapshots metric by metric.
pub fn compare_periods(
    store: &LedgerStore,
    period_1_id: &str,
    period_2_id: &str,
) -> LedgerResult<PeriodComparison> {
    let (p1, s1) = closed_period(store, period_1_id)?;
    let (p2, s2) = closed_period(store, period_2_id)?;

    let pairs: [(&'static str, Decimal, Decimal); 9] = [
        ("total_assets", s1.total_assets, s2.total_assets),
        ("total_liabilities", s1.total_liabilities, s2.total_liabilities),
        ("total_equity", s1.total_equity, s2.total_equity),
        ("revenue", s1.revenue, s2.revenue),
        ("expenses", s1.expenses, s2.expenses),
        ("net_income", s1.net_income, s2.net_income),
        ("retained_earnings", s1.retained_earnings, s2.retained_earnings),
        ("inventory_value", s1.inventory_value, s2.inventory_value),
        ("working_capital", s1.working_capital, s2.working_capital),
    ];

    let metrics = pairs
        .into_iter()
        .map(|(metric, value_1, value_2)| {
            let change = value_2 - value_1;
            let change_percent = if value_1 == Decimal::ZERO {
                None
            } else {
                Some(round_currency(change / value_1.abs() * Decimal::from(100)))
            };
            MetricComparison {
                metric,
                value_1,
                value_2,
                change,
                change_percent,
            }
        })
        .collect();

    Ok(PeriodComparison {
        period_1_id: p1.id.clone(),
        period_1_name: p1.name.clone(),
        period_2_id: p2.id.clone(),
        period_2_name: p2.name.clone(),
        metrics,
    })
}

fn closed_period<'a>(
    store: &'a LedgerStore,
    period_id: &str,
) -> LedgerResult<(&'a AccountingPeriod, &'a BalanceSheetSnapshot)> {
    let period = store
        .accounting_period(period_id)
        .ok_or_else(|| LedgerError::PeriodNotFound {
            id: period_id.to_string(),
        })?;
    let snapshot = period
        .snapshot
        .as_ref()
        .ok_or_else(|| LedgerError::PeriodNotClosed {
            id: period_id.to_string(),
        })?;
    Ok((period, snapshot))
}

fn get_period_mut<'a>(
    store: &'a mut LedgerStore,
    period_id: &str,
) -> LedgerResult<&'a mut AccountingPeriod> {
    store
        .accounting_periods
        .get_mut(period_id)
        .ok_or_else(|| LedgerError::PeriodNotFound {
            id: period_id.to_string(),
        })
}
