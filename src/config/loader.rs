//! Configuration loading functionality.
//!
//! This module implements loading of [`EngineDefaults`] from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{LedgerError, LedgerResult};

use super::types::EngineDefaults;

impl EngineDefaults {
    /// Loads engine defaults from the specified YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the defaults file (e.g., "./config/engine.yaml")
    ///
    /// # Returns
    ///
    /// Returns the loaded defaults, or an error if the file is missing or
    /// contains invalid YAML.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ledger_engine::config::EngineDefaults;
    ///
    /// let defaults = EngineDefaults::load("./config/engine.yaml")?;
    /// println!("Fallback rate: {}%", defaults.fallback_commission_rate);
    /// # Ok::<(), ledger_engine::error::LedgerError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LedgerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| LedgerError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }
}
