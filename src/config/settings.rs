//! Ledger settings loading from ledger.toml
//!
//! Every key is optional. A missing file yields the defaults; a file that exists
//! but cannot be parsed, or holds invalid values, is a configuration error.

use crate::{
    core::validation,
    errors::{Error, Result},
    models::UnknownKindPolicy,
};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Default location of the settings file
pub const DEFAULT_CONFIG_PATH: &str = "ledger.toml";

/// Configuration structure representing the entire ledger.toml file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Currency assigned to admins who do not pick one
    pub default_currency: String,
    /// How transactions with an unrecognised type are treated when aggregating
    pub unknown_transaction_types: UnknownKindPolicy,
    /// Number of recent transactions shown on a friend statement
    pub recent_transaction_limit: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
            unknown_transaction_types: UnknownKindPolicy::default(),
            recent_transaction_limit: 10,
        }
    }
}

impl LedgerConfig {
    fn validate(self) -> Result<Self> {
        validation::validate_currency_code(&self.default_currency).map_err(|e| Error::Config {
            message: e.to_string(),
        })?;
        Ok(self)
    }
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns [`Error::Config`] if the TOML is invalid, has unknown keys, or the
/// currency code is malformed.
pub fn parse_config(contents: &str) -> Result<LedgerConfig> {
    let config: LedgerConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse ledger.toml: {e}"),
    })?;
    config.validate()
}

/// Loads settings from a TOML file, using defaults if the file does not exist.
///
/// # Errors
/// Returns [`Error::Config`] if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LedgerConfig> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No config file at {:?}, using defaults", path);
        return Ok(LedgerConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path:?}: {e}"),
    })?;
    parse_config(&contents)
}

/// Loads settings from `LEDGER_CONFIG`, or from `./ledger.toml` when unset.
pub fn load_default_config() -> Result<LedgerConfig> {
    let path = std::env::var("LEDGER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config(path)
}
