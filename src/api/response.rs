//! Response types for the ledger engine API.
//!
//! This module defines the error response structures and the mapping
//! from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<LedgerError> for ApiErrorResponse {
    fn from(error: LedgerError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            LedgerError::ConfigNotFound { .. } | LedgerError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            LedgerError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            LedgerError::InvalidDateRange { .. } => {
                (StatusCode::BAD_REQUEST, "INVALID_DATE_RANGE")
            }
            LedgerError::RateOutOfRange { .. } => (StatusCode::BAD_REQUEST, "RATE_OUT_OF_RANGE"),
            LedgerError::EmptyReopenReason { .. } => {
                (StatusCode::BAD_REQUEST, "EMPTY_REOPEN_REASON")
            }
            LedgerError::PeriodNotFound { .. } => (StatusCode::NOT_FOUND, "PERIOD_NOT_FOUND"),
            LedgerError::RecordNotFound { .. } => (StatusCode::NOT_FOUND, "RECORD_NOT_FOUND"),
            LedgerError::EntryNotFound { .. } => (StatusCode::NOT_FOUND, "ENTRY_NOT_FOUND"),
            LedgerError::PeriodOverlap { .. } => (StatusCode::CONFLICT, "PERIOD_OVERLAP"),
            LedgerError::PayrollPeriodPaid { .. } => (StatusCode::CONFLICT, "PERIOD_PAID"),
            LedgerError::RecordAlreadyPaid { .. } => (StatusCode::CONFLICT, "RECORD_PAID"),
            LedgerError::PeriodNotCalculated { .. } => {
                (StatusCode::CONFLICT, "PERIOD_NOT_CALCULATED")
            }
            LedgerError::RecordsUnpaid { .. } => (StatusCode::CONFLICT, "RECORDS_UNPAID"),
            LedgerError::PeriodClosed { .. } => (StatusCode::CONFLICT, "PERIOD_CLOSED"),
            LedgerError::PeriodNotClosed { .. } => (StatusCode::CONFLICT, "PERIOD_NOT_CLOSED"),
            LedgerError::OutOfBalance { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "OUT_OF_BALANCE")
            }
        };
        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response: ApiErrorResponse = LedgerError::PeriodNotFound {
            id: "missing".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "PERIOD_NOT_FOUND");
    }

    #[test]
    fn test_state_conflicts_map_to_409() {
        let response: ApiErrorResponse = LedgerError::PayrollPeriodPaid {
            id: "per_001".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::CONFLICT);

        let response: ApiErrorResponse = LedgerError::PeriodOverlap {
            name: "March 2025".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "PERIOD_OVERLAP");
    }

    #[test]
    fn test_out_of_balance_maps_to_422() {
        let response: ApiErrorResponse = LedgerError::OutOfBalance {
            difference: Decimal::from_str("25.50").unwrap(),
            tolerance: Decimal::ONE,
        }
        .into();
        assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.error.code, "OUT_OF_BALANCE");
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response: ApiErrorResponse = LedgerError::RateOutOfRange {
            field: "rate".to_string(),
            value: Decimal::from_str("120").unwrap(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}
