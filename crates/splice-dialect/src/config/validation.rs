//! Configuration validation.

use super::Config;
use crate::core::identifier::validate_identifier;
use crate::error::{ReflectError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    let conn = &config.connection;

    // A raw connection string carries everything the driver needs
    if conn.odbc_connect.is_none() {
        if conn.host.is_empty() {
            return Err(ReflectError::Config("connection.host is required".into()));
        }
        if conn.user.is_empty() {
            return Err(ReflectError::Config("connection.user is required".into()));
        }
        if conn.port == 0 {
            return Err(ReflectError::Config(
                "connection.port must be greater than 0".into(),
            ));
        }
    } else if conn.odbc_connect.as_deref().is_some_and(str::is_empty) {
        return Err(ReflectError::Config(
            "connection.odbc_connect cannot be empty".into(),
        ));
    }

    if config.reflection.system_schema_prefix.is_empty() {
        return Err(ReflectError::Config(
            "reflection.system_schema_prefix cannot be empty".into(),
        ));
    }

    if let Some(schema) = &config.reflection.default_schema {
        validate_identifier(schema).map_err(|e| {
            ReflectError::Config(format!("reflection.default_schema: {}", e))
        })?;
    }

    Ok(())
}
