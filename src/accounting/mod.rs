//! Accounting: balance sheet aggregation and the accounting period
//! lifecycle.

mod balance_sheet;
mod periods;

pub use balance_sheet::{balance_sheet_summary, save_balance_sheet_record};
pub use periods::{
    MetricComparison, PeriodComparison, close_accounting_period, compare_periods,
    create_accounting_period, current_open_period, delete_accounting_period,
    list_accounting_periods, mark_period_closing, reopen_accounting_period,
};
