//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

impl ConnectionConfig {
    /// Resolve the ODBC driver name: explicit setting, then the
    /// `SPLICE_ODBC_DRIVER_NAME` environment variable, then the default.
    pub fn driver_name(&self) -> String {
        self.odbc_driver
            .clone()
            .or_else(|| std::env::var(ODBC_DRIVER_ENV).ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| DEFAULT_ODBC_DRIVER.to_string())
    }

    /// Build an ODBC connection string for the Splice Machine driver.
    pub fn connection_string(&self) -> String {
        if let Some(raw) = &self.odbc_connect {
            return raw.clone();
        }

        format!(
            "DRIVER={{{}}};URL={};PORT={};UID={};PWD={};SSL={}",
            self.driver_name(),
            odbc_value(&self.host),
            self.port,
            odbc_value(&self.user),
            odbc_value(&self.password),
            odbc_value(&self.ssl)
        )
    }

    /// Connection string with the password masked, for logging.
    pub fn redacted_connection_string(&self) -> String {
        if self.odbc_connect.is_some() {
            return "[REDACTED odbc_connect]".to_string();
        }
        format!(
            "DRIVER={{{}}};URL={};PORT={};UID={};PWD=***;SSL={}",
            self.driver_name(),
            odbc_value(&self.host),
            self.port,
            odbc_value(&self.user),
            odbc_value(&self.ssl)
        )
    }
}

/// Brace-quote a connection-string value that would otherwise end its
/// attribute early. Closing braces inside are doubled.
fn odbc_value(value: &str) -> String {
    if value.contains([';', '{', '}']) || value.trim() != value {
        format!("{{{}}}", value.replace('}', "}}"))
    } else {
        value.to_string()
    }
}
