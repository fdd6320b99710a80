//! Balance sheet aggregation.
//!
//! Cash and retained earnings are both derived from the same cumulative
//! operating figure (revenue minus expenses since inception), so an empty
//! branch balances by construction. Manual rows in derived categories are
//! kept for record-keeping but never summed, which keeps the derived
//! figures from being double counted.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::config::EngineDefaults;
use crate::error::LedgerResult;
use crate::ledger::OperatingLedger;
use crate::models::{
    round_currency, AssetType, AssetsSection, BalanceSheetRecord, BalanceSheetSummary,
    EquitySection, FinancialRatios, LiabilitiesSection, LiabilityType, RatioStatus,
};
use crate::store::LedgerStore;

/// Aggregates a branch's full financial position as of a date.
pub fn balance_sheet_summary(
    store: &LedgerStore,
    operating: &dyn OperatingLedger,
    defaults: &EngineDefaults,
    branch_id: &str,
    as_of: NaiveDate,
) -> BalanceSheetSummary {
    let figures = operating.cumulative_figures(branch_id, as_of);
    let cash = figures.net();
    let inventory = operating.inventory_value(branch_id);

    let mut manual_current = Decimal::ZERO;
    let mut fixed = Decimal::ZERO;
    let mut intangible = Decimal::ZERO;
    for asset in store.assets_for_branch(branch_id) {
        match asset.asset_type {
            AssetType::Current => {
                if !asset.category.is_derived() {
                    manual_current += asset.amount;
                }
            }
            AssetType::Fixed => fixed += asset.amount,
            AssetType::Intangible => intangible += asset.amount,
        }
    }

    let current_assets = cash + inventory + manual_current;
    let total_assets = current_assets + fixed + intangible;

    let mut current_liabilities = Decimal::ZERO;
    let mut long_term_liabilities = Decimal::ZERO;
    for liability in store.liabilities_for_branch(branch_id) {
        match liability.liability_type {
            LiabilityType::Current => current_liabilities += liability.balance,
            LiabilityType::LongTerm => long_term_liabilities += liability.balance,
        }
    }
    let total_liabilities = current_liabilities + long_term_liabilities;

    let manual_equity: Decimal = store
        .equity_for_branch(branch_id)
        .iter()
        .map(|e| e.amount)
        .sum();
    let retained_earnings = cash;
    let total_equity = manual_equity + retained_earnings;

    let working_capital = current_assets - current_liabilities;
    let current_ratio = ratio(current_assets, current_liabilities);
    let quick_ratio = ratio(current_assets - inventory, current_liabilities);
    let debt_to_equity_ratio = ratio(total_liabilities, total_equity);

    let balance_difference = total_assets - (total_liabilities + total_equity);
    let is_balanced = balance_difference.abs() <= defaults.balance_epsilon;

    BalanceSheetSummary {
        branch_id: branch_id.to_string(),
        as_of,
        assets: AssetsSection {
            cash_and_equivalents: round_currency(cash),
            inventory: round_currency(inventory),
            manual_current: round_currency(manual_current),
            current: round_currency(current_assets),
            fixed: round_currency(fixed),
            intangible: round_currency(intangible),
            total: round_currency(total_assets),
        },
        liabilities: LiabilitiesSection {
            current: round_currency(current_liabilities),
            long_term: round_currency(long_term_liabilities),
            total: round_currency(total_liabilities),
        },
        equity: EquitySection {
            manual_total: round_currency(manual_equity),
            retained_earnings: round_currency(retained_earnings),
            total: round_currency(total_equity),
        },
        revenue_to_date: round_currency(figures.revenue),
        expenses_to_date: round_currency(figures.expenses),
        ratios: FinancialRatios {
            working_capital: round_currency(working_capital),
            current_ratio,
            current_ratio_status: RatioStatus::for_current_ratio(current_ratio),
            quick_ratio,
            debt_to_equity_ratio,
            debt_to_equity_status: RatioStatus::for_debt_to_equity(debt_to_equity_ratio),
        },
        is_balanced,
        balance_difference: round_currency(balance_difference),
    }
}

/// Appends a dated balance-sheet record to the branch's trend history.
pub fn save_balance_sheet_record(
    store: &mut LedgerStore,
    summary: &BalanceSheetSummary,
    notes: Option<String>,
) -> LedgerResult<BalanceSheetRecord> {
    let record = BalanceSheetRecord {
        id: LedgerStore::new_id(),
        branch_id: summary.branch_id.clone(),
        as_of: summary.as_of,
        total_assets: summary.assets.total,
        total_liabilities: summary.liabilities.total,
        total_equity: summary.equity.total,
        working_capital: summary.ratios.working_capital,
        is_balanced: summary.is_balanced,
        notes,
        created_at: Utc::now(),
    };
    store.balance_sheet_records.push(record.clone());
    Ok(record)
}

fn ratio(numerator: Decimal, denominator: Decimal) -> Option<Decimal> {
    if denominator == Decimal::ZERO {
        None
    } else {
        Some(round_currency(numerator / denominator))
    }
}
