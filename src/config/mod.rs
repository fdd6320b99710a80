//! Configuration loading and management for the ledger engine.
//!
//! This module provides the engine-wide defaults loaded from a YAML file:
//! the fallback commission rate, the balance tolerance used on period
//! close, and the reporting currency.
//!
//! # Example
//!
//! ```no_run
//! use ledger_engine::config::EngineDefaults;
//!
//! let defaults = EngineDefaults::load("./config/engine.yaml").unwrap();
//! println!("Currency: {}", defaults.currency);
//! ```

mod loader;
mod types;

pub use types::EngineDefaults;
