//! Payroll period lifecycle management.
//!
//! Periods move draft -> calculated -> paid. Calculation is a full
//! replace: running it again rebuilds every record from current activity
//! and rates, discarding prior records and their adjustments. Once a
//! period is paid, nothing about it changes again.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::calculation::calculate_barber_pay;
use crate::config::EngineDefaults;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{BookingLedger, SalesLedger, StaffDirectory};
use crate::models::{
    round_currency, AdjustmentKind, DateRange, PaymentMethod, PayrollAdjustment, PayrollPeriod,
    PayrollPeriodStatus, PayrollPeriodType, PayrollRecord, PayrollRecordStatus,
};
use crate::store::LedgerStore;

/// Per-period line of the branch payroll summary.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PeriodSummary {
    /// The period itself.
    pub period: PayrollPeriod,
    /// Number of payroll records in the period.
    pub total_barbers: usize,
    /// Records already paid out.
    pub paid_records: usize,
    /// Records still awaiting payout.
    pub pending_records: usize,
}

/// Creates a draft payroll period.
///
/// Overlapping payroll periods are allowed; a branch may run a correction
/// period over dates an earlier one already covered.
pub fn create_payroll_period(
    store: &mut LedgerStore,
    branch_id: &str,
    range: DateRange,
    period_type: PayrollPeriodType,
) -> LedgerResult<PayrollPeriod> {
    let period = PayrollPeriod {
        id: LedgerStore::new_id(),
        branch_id: branch_id.to_string(),
        range,
        period_type,
        status: PayrollPeriodStatus::Draft,
        total_earnings: Decimal::ZERO,
        total_commissions: Decimal::ZERO,
        total_deductions: Decimal::ZERO,
        created_at: Utc::now(),
        calculated_at: None,
        paid_at: None,
    };
    store
        .payroll_periods
        .insert(period.id.clone(), period.clone());
    Ok(period)
}

/// Calculates (or recalculates) every record in a payroll period.
///
/// Builds all records from the branch roster and period activity before
/// touching the store, then replaces the previous records and their
/// adjustments in one step. Rejected once the period is paid.
pub fn calculate_payroll_period(
    store: &mut LedgerStore,
    bookings: &dyn BookingLedger,
    sales: &dyn SalesLedger,
    staff: &dyn StaffDirectory,
    defaults: &EngineDefaults,
    period_id: &str,
) -> LedgerResult<Vec<PayrollRecord>> {
    let period = store
        .payroll_period(period_id)
        .ok_or_else(|| LedgerError::PeriodNotFound {
            id: period_id.to_string(),
        })?
        .clone();
    if period.status == PayrollPeriodStatus::Paid {
        return Err(LedgerError::PayrollPeriodPaid {
            id: period_id.to_string(),
        });
    }

    let now = Utc::now();
    let mut records = Vec::new();
    for barber in staff.active_barbers(&period.branch_id) {
        let barber_bookings = bookings.completed_paid_bookings(&barber.id, &period.range);
        let barber_sales = sales.completed_sales(&barber.id, &period.range);
        let pay = calculate_barber_pay(
            &barber.id,
            &period.branch_id,
            &barber_bookings,
            &barber_sales,
            store.rates(),
            defaults,
        );

        records.push(PayrollRecord {
            id: LedgerStore::new_id(),
            period_id: period_id.to_string(),
            barber_id: barber.id,
            barber_name: barber.name,
            commission_rate: pay.commission_rate,
            daily_rate: pay.daily_rate,
            days_worked: pay.days_worked,
            total_services: pay.total_services,
            total_service_revenue: pay.service_revenue,
            total_product_quantity: pay.total_product_quantity,
            service_commission: pay.service_commission,
            transaction_commission: pay.transaction_commission,
            daily_pay: pay.daily_pay,
            gross_pay: pay.gross_pay,
            tax_deduction: pay.tax_deduction,
            other_deductions: Decimal::ZERO,
            net_pay: pay.net_pay,
            status: PayrollRecordStatus::Calculated,
            paid_at: None,
            payment_method: None,
            payment_reference: None,
            notes: None,
            created_at: now,
        });
    }

    let total_earnings: Decimal = records.iter().map(|r| r.gross_pay).sum();
    let total_commissions: Decimal = records
        .iter()
        .map(|r| r.service_commission + r.transaction_commission)
        .sum();
    let total_deductions: Decimal = records
        .iter()
        .map(|r| r.tax_deduction + r.other_deductions)
        .sum();

    // All inputs computed; now swap the old records out atomically.
    let old_ids: Vec<String> = store
        .payroll_records
        .values()
        .filter(|r| r.period_id == period_id)
        .map(|r| r.id.clone())
        .collect();
    for id in &old_ids {
        store.payroll_records.remove(id);
    }
    store
        .adjustments
        .retain(|a| !old_ids.contains(&a.record_id));
    for record in &records {
        store
            .payroll_records
            .insert(record.id.clone(), record.clone());
    }

    if let Some(stored) = store.payroll_periods.get_mut(period_id) {
        stored.status = PayrollPeriodStatus::Calculated;
        stored.total_earnings = round_currency(total_earnings);
        stored.total_commissions = round_currency(total_commissions);
        stored.total_deductions = round_currency(total_deductions);
        stored.calculated_at = Some(now);
    }

    Ok(records)
}

/// Marks one payroll record as paid.
pub fn mark_record_paid(
    store: &mut LedgerStore,
    record_id: &str,
    method: PaymentMethod,
    reference: Option<String>,
    notes: Option<String>,
) -> LedgerResult<PayrollRecord> {
    let record = store
        .payroll_record(record_id)
        .ok_or_else(|| LedgerError::RecordNotFound {
            id: record_id.to_string(),
        })?;
    if record.status == PayrollRecordStatus::Paid {
        return Err(LedgerError::RecordAlreadyPaid {
            id: record_id.to_string(),
        });
    }
    let period_id = record.period_id.clone();
    let period = store
        .payroll_period(&period_id)
        .ok_or_else(|| LedgerError::PeriodNotFound {
            id: period_id.clone(),
        })?;
    if period.status != PayrollPeriodStatus::Calculated {
        return Err(LedgerError::PeriodNotCalculated { id: period_id });
    }

    let record = store
        .payroll_records
        .get_mut(record_id)
        .ok_or_else(|| LedgerError::RecordNotFound {
            id: record_id.to_string(),
        })?;
    record.status = PayrollRecordStatus::Paid;
    record.paid_at = Some(Utc::now());
    record.payment_method = Some(method);
    record.payment_reference = reference;
    record.notes = notes;
    Ok(record.clone())
}

/// Marks a payroll period as paid and freezes it.
///
/// Every record must already be paid out individually.
pub fn mark_period_paid(store: &mut LedgerStore, period_id: &str) -> LedgerResult<PayrollPeriod> {
    let period = store
        .payroll_period(period_id)
        .ok_or_else(|| LedgerError::PeriodNotFound {
            id: period_id.to_string(),
        })?;
    if period.status == PayrollPeriodStatus::Paid {
        return Err(LedgerError::PayrollPeriodPaid {
            id: period_id.to_string(),
        });
    }
    if period.status != PayrollPeriodStatus::Calculated {
        return Err(LedgerError::PeriodNotCalculated {
            id: period_id.to_string(),
        });
    }
    let unpaid = store
        .payroll_records
        .values()
        .filter(|r| r.period_id == period_id && r.status != PayrollRecordStatus::Paid)
        .count();
    if unpaid > 0 {
        return Err(LedgerError::RecordsUnpaid {
            id: period_id.to_string(),
            unpaid,
        });
    }

    let period = store
        .payroll_periods
        .get_mut(period_id)
        .ok_or_else(|| LedgerError::PeriodNotFound {
            id: period_id.to_string(),
        })?;
    period.status = PayrollPeriodStatus::Paid;
    period.paid_at = Some(Utc::now());
    Ok(period.clone())
}

/// Deletes a payroll period and everything under it.
///
/// Paid periods are immutable and cannot be deleted.
pub fn delete_payroll_period(store: &mut LedgerStore, period_id: &str) -> LedgerResult<()> {
    let period = store
        .payroll_period(period_id)
        .ok_or_else(|| LedgerError::PeriodNotFound {
            id: period_id.to_string(),
        })?;
    if period.status == PayrollPeriodStatus::Paid {
        return Err(LedgerError::PayrollPeriodPaid {
            id: period_id.to_string(),
        });
    }

    let record_ids: Vec<String> = store
        .payroll_records
        .values()
        .filter(|r| r.period_id == period_id)
        .map(|r| r.id.clone())
        .collect();
    for id in &record_ids {
        store.payroll_records.remove(id);
    }
    store
        .adjustments
        .retain(|a| !record_ids.contains(&a.record_id));
    store.payroll_periods.remove(period_id);
    Ok(())
}

/// Applies a manual adjustment to a payroll record's net pay.
///
/// Bonuses add to net pay, deductions subtract (and accumulate into the
/// record's other deductions), and corrections carry their own sign.
pub fn add_adjustment(
    store: &mut LedgerStore,
    record_id: &str,
    kind: AdjustmentKind,
    amount: Decimal,
    reason: &str,
) -> LedgerResult<PayrollAdjustment> {
    if reason.trim().is_empty() {
        return Err(LedgerError::InvalidInput {
            field: "reason".to_string(),
            message: "adjustment reason cannot be empty".to_string(),
        });
    }
    if matches!(kind, AdjustmentKind::Bonus | AdjustmentKind::Deduction)
        && amount <= Decimal::ZERO
    {
        return Err(LedgerError::InvalidInput {
            field: "amount".to_string(),
            message: "bonus and deduction amounts must be positive".to_string(),
        });
    }

    let record = store
        .payroll_records
        .get_mut(record_id)
        .ok_or_else(|| LedgerError::RecordNotFound {
            id: record_id.to_string(),
        })?;
    if record.status == PayrollRecordStatus::Paid {
        return Err(LedgerError::RecordAlreadyPaid {
            id: record_id.to_string(),
        });
    }

    match kind {
        AdjustmentKind::Bonus => record.net_pay = round_currency(record.net_pay + amount),
        AdjustmentKind::Deduction => {
            record.net_pay = round_currency(record.net_pay - amount);
            record.other_deductions = round_currency(record.other_deductions + amount);
        }
        AdjustmentKind::Correction => record.net_pay = round_currency(record.net_pay + amount),
    }

    let adjustment = PayrollAdjustment {
        id: LedgerStore::new_id(),
        record_id: record_id.to_string(),
        kind,
        amount,
        reason: reason.to_string(),
        created_at: Utc::now(),
    };
    store.adjustments.push(adjustment.clone());
    Ok(adjustment)
}

/// Summarizes a branch's payroll periods, newest first.
pub fn payroll_summary(store: &LedgerStore, branch_id: &str) -> Vec<PeriodSummary> {
    store
        .payroll_periods_for_branch(branch_id)
        .into_iter()
        .map(|period| {
            let records = store.records_for_period(&period.id);
            let paid = records
                .iter()
                .filter(|r| r.status == PayrollRecordStatus::Paid)
                .count();
            PeriodSummary {
                total_barbers: records.len(),
                paid_records: paid,
                pending_records: records.len() - paid,
                period,
            }
        })
        .collect()
}
