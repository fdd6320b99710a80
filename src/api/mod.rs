//! HTTP API module for the ledger engine.
//!
//! This module provides the REST endpoints for payroll periods, rates,
//! the balance sheet, and accounting periods.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use response::ApiError;
pub use state::AppState;
