//! Activity models: date ranges, bookings, sales, and P&L figures.
//!
//! These are the read-only shapes delivered by the booking, point-of-sale
//! and operating-ledger collaborators. The engine never mutates them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// An inclusive date range, used for payroll and accounting periods.
///
/// # Example
///
/// ```
/// use ledger_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
/// ).unwrap();
///
/// assert!(range.contains(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()));
/// assert!(!range.contains(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// The start date (inclusive).
    pub start_date: NaiveDate,
    /// The end date (inclusive).
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting ranges whose end is not after the start.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> LedgerResult<Self> {
        if end_date <= start_date {
            return Err(LedgerError::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Checks whether a date falls within this range (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Checks whether two ranges share at least one day.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}

/// A completed, paid service booking attributable to a barber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique booking ID.
    pub id: String,
    /// The barber who performed the service.
    pub barber_id: String,
    /// The branch the booking belongs to.
    pub branch_id: String,
    /// The service performed.
    pub service_id: String,
    /// The day the service was completed.
    pub date: NaiveDate,
    /// The price paid for the service.
    pub price: Decimal,
}

/// A single product line within a point-of-sale transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLine {
    /// The product sold.
    pub product_id: String,
    /// Unit price.
    pub price: Decimal,
    /// Units sold.
    pub quantity: u32,
}

impl SaleLine {
    /// Revenue for this line (`price * quantity`).
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A completed point-of-sale transaction attributable to a barber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique transaction ID.
    pub id: String,
    /// The barber credited with the sale.
    pub barber_id: String,
    /// The branch the sale belongs to.
    pub branch_id: String,
    /// The day the sale was completed.
    pub date: NaiveDate,
    /// Product lines on the receipt.
    pub lines: Vec<SaleLine>,
}

impl Sale {
    /// Total product revenue across all lines.
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(SaleLine::line_total).sum()
    }
}

/// Revenue and expense totals reported by the operating ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PnlFigures {
    /// Total revenue.
    pub revenue: Decimal,
    /// Total expenses.
    pub expenses: Decimal,
}

impl PnlFigures {
    /// Net income (`revenue - expenses`).
    pub fn net(&self) -> Decimal {
        self.revenue - self.expenses
    }
}
