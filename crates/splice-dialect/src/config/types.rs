//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the ODBC driver name.
pub const ODBC_DRIVER_ENV: &str = "SPLICE_ODBC_DRIVER_NAME";

/// Driver name registered by the Splice Machine ODBC installer.
pub const DEFAULT_ODBC_DRIVER: &str = "SpliceODBCDriver";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection settings.
    pub connection: ConnectionConfig,

    /// Reflection behavior.
    #[serde(default)]
    pub reflection: ReflectionConfig,
}

/// Which catalog row profile the connected driver produces.
///
/// The ODBC driver and the native wire driver return the same catalog
/// procedures with slightly different row shapes and default-schema rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverProfile {
    #[default]
    Odbc,
    Native,
}

impl DriverProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverProfile::Odbc => "odbc",
            DriverProfile::Native => "native",
        }
    }
}

/// Splice Machine connection configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Catalog row profile (default: odbc).
    #[serde(default)]
    pub driver: DriverProfile,

    /// ODBC driver name or library path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odbc_driver: Option<String>,

    /// Raw ODBC connection string. Overrides every field below.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odbc_connect: Option<String>,

    /// Database host.
    #[serde(default)]
    pub host: String,

    /// Database port (default: 1527).
    #[serde(default = "default_splice_port")]
    pub port: u16,

    /// Username.
    #[serde(default)]
    pub user: String,

    /// Password.
    #[serde(default, skip_serializing)]
    pub password: String,

    /// SSL mode passed through to the driver (default: "basic").
    #[serde(default = "default_ssl")]
    pub ssl: String,
}

impl std::fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("driver", &self.driver)
            .field("odbc_driver", &self.odbc_driver)
            .field(
                "odbc_connect",
                &self.odbc_connect.as_ref().map(|_| "[REDACTED]"),
            )
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("ssl", &self.ssl)
            .finish()
    }
}

/// Reflection behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReflectionConfig {
    /// Schema used when a call names none. When unset the driver's
    /// current schema is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_schema: Option<String>,

    /// Lower-case table and view names even when they would need quoting
    /// (default: true).
    #[serde(default = "default_true")]
    pub lowercase_names: bool,

    /// Schemas starting with this prefix are hidden from schema listings
    /// (default: "SYS").
    #[serde(default = "default_system_prefix")]
    pub system_schema_prefix: String,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            default_schema: None,
            lowercase_names: true,
            system_schema_prefix: default_system_prefix(),
        }
    }
}

// Default value functions for serde
fn default_splice_port() -> u16 {
    1527
}

fn default_ssl() -> String {
    "basic".to_string()
}

fn default_system_prefix() -> String {
    "SYS".to_string()
}

fn default_true() -> bool {
    true
}
