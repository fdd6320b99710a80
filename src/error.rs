//! Error types for the ledger engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions in payroll and accounting operations.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the ledger engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use ledger_engine::error::LedgerError;
///
/// let error = LedgerError::PeriodNotFound {
///     id: "per_001".to_string(),
/// };
/// assert_eq!(error.to_string(), "Period not found: per_001");
/// ```
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An input field was invalid or contained inconsistent data.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A date range had its end on or before its start.
    #[error("Invalid date range: end date {end} must be after start date {start}")]
    InvalidDateRange {
        /// The start date of the range.
        start: chrono::NaiveDate,
        /// The end date of the range.
        end: chrono::NaiveDate,
    },

    /// A commission or tax rate was outside the 0-100 percentage domain.
    #[error("Rate {value} for '{field}' is outside the 0-100 range")]
    RateOutOfRange {
        /// The field carrying the rate.
        field: String,
        /// The offending value.
        value: Decimal,
    },

    /// A payroll or accounting period was not found.
    #[error("Period not found: {id}")]
    PeriodNotFound {
        /// The period ID that was not found.
        id: String,
    },

    /// A payroll record was not found.
    #[error("Payroll record not found: {id}")]
    RecordNotFound {
        /// The record ID that was not found.
        id: String,
    },

    /// An entity (asset, liability, or equity entry) was not found.
    #[error("Entry not found: {id}")]
    EntryNotFound {
        /// The entry ID that was not found.
        id: String,
    },

    /// An accounting period overlapped an existing one for the branch.
    #[error("Period overlaps with existing period '{name}'")]
    PeriodOverlap {
        /// The name of the conflicting period.
        name: String,
    },

    /// A payroll period was already paid out and cannot be modified.
    #[error("Payroll period '{id}' is already paid")]
    PayrollPeriodPaid {
        /// The payroll period ID.
        id: String,
    },

    /// A payroll record was already marked as paid.
    #[error("Payroll record '{id}' is already paid")]
    RecordAlreadyPaid {
        /// The payroll record ID.
        id: String,
    },

    /// A payroll period has not been calculated yet.
    #[error("Payroll period '{id}' has not been calculated")]
    PeriodNotCalculated {
        /// The payroll period ID.
        id: String,
    },

    /// A payroll period still has unpaid records.
    #[error("Payroll period '{id}' has {unpaid} unpaid record(s)")]
    RecordsUnpaid {
        /// The payroll period ID.
        id: String,
        /// How many records are still unpaid.
        unpaid: usize,
    },

    /// An accounting period is closed and cannot be modified.
    #[error("Accounting period '{id}' is closed")]
    PeriodClosed {
        /// The accounting period ID.
        id: String,
    },

    /// An operation required a closed accounting period.
    #[error("Accounting period '{id}' is not closed")]
    PeriodNotClosed {
        /// The accounting period ID.
        id: String,
    },

    /// Reopening a period requires a non-empty reason.
    #[error("Reopening period '{id}' requires a non-empty reason")]
    EmptyReopenReason {
        /// The accounting period ID.
        id: String,
    },

    /// The balance sheet drifted beyond the configured tolerance.
    #[error("Balance sheet is out of balance by {difference} (tolerance {tolerance})")]
    OutOfBalance {
        /// Assets minus (liabilities + equity).
        difference: Decimal,
        /// The configured tolerance.
        tolerance: Decimal,
    },
}

/// A type alias for Results that return LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;
