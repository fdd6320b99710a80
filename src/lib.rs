//! Branch Financial Ledger & Payroll Computation Core
//!
//! This crate computes barber pay (commission and daily-rate floors), manages
//! payroll periods, aggregates branch balance sheets, and drives the
//! accounting period lifecycle for a multi-branch salon platform.

#![warn(missing_docs)]

pub mod accounting;
pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod payroll;
pub mod store;
