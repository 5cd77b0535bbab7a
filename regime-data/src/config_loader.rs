//! Loader for regime rate tables stored as TOML.
//!
//! Keys mirror [`RegimeConfig`]; any key left out keeps its default value.
//!
//! ```toml
//! simplified_rate = 0.04
//! proprietor_profit_rate = 0.10
//! company_profit_rate = 0.20
//! simplified_monthly_ceiling = 1300000
//! simplified_annual_ceiling = 2500000000
//!
//! [payroll]
//! pension_rate = 0.10
//! social_tax_rate = 0.095
//! ```

use std::path::Path;

use regime_core::{ConfigError, RegimeConfig};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a rate table.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigError),
}

/// Parses and validates a rate table from TOML text.
///
/// # Errors
///
/// * [`ConfigLoadError::Parse`] if the text is not valid TOML or a value has
///   the wrong type.
/// * [`ConfigLoadError::Invalid`] if a rate or ceiling is out of range.
pub fn load_config_from_str(input: &str) -> Result<RegimeConfig, ConfigLoadError> {
    let config: RegimeConfig = toml::from_str(input)?;
    config.validate()?;
    Ok(config)
}

/// Reads a rate table from disk and delegates to [`load_config_from_str`].
pub fn load_config_from_file(path: &Path) -> Result<RegimeConfig, ConfigLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), "loading rate table");
    load_config_from_str(&contents)
}
