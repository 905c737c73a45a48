//! Splice Machine driver profiles.
//!
//! The two drivers read the same catalog procedures but disagree on a few
//! row positions and on how the session schema is found:
//!
//! - [`odbc`]: ODBC driver; asks the server for `CURRENT SCHEMA`
//! - [`native`]: native wire driver; the default schema is always `SPLICE`
//!
//! # Adding New Drivers
//!
//! 1. Create a module under `drivers/` implementing `CatalogDriver`
//! 2. Add a variant to `DriverImpl` and a profile to `DriverProfile`
//! 3. Register its names in `DriverImpl::from_name()`

pub mod native;
pub mod odbc;

pub use native::NativeDriver;
#[cfg(feature = "odbc")]
pub use odbc::OdbcConnection;
pub use odbc::OdbcDriver;

use async_trait::async_trait;

use crate::catalog::query::TableType;
use crate::catalog::rows::{ColumnsLayout, ForeignKeyLayout, PrimaryKeyLayout, StatisticsLayout};
use crate::config::DriverProfile;
use crate::core::traits::{CatalogDriver, Connection};
use crate::error::{ReflectError, Result};

/// Enum-based static dispatch for driver profiles.
#[derive(Debug, Clone, Copy)]
pub enum DriverImpl {
    Odbc(OdbcDriver),
    Native(NativeDriver),
}

impl Default for DriverImpl {
    fn default() -> Self {
        DriverImpl::Odbc(OdbcDriver::new())
    }
}

#[async_trait]
impl CatalogDriver for DriverImpl {
    fn name(&self) -> &str {
        match self {
            DriverImpl::Odbc(d) => d.name(),
            DriverImpl::Native(d) => d.name(),
        }
    }

    async fn current_schema(&self, conn: &mut dyn Connection) -> Result<String> {
        match self {
            DriverImpl::Odbc(d) => d.current_schema(conn).await,
            DriverImpl::Native(d) => d.current_schema(conn).await,
        }
    }

    fn table_types(&self) -> &'static [TableType] {
        match self {
            DriverImpl::Odbc(d) => d.table_types(),
            DriverImpl::Native(d) => d.table_types(),
        }
    }

    fn columns_layout(&self) -> ColumnsLayout {
        match self {
            DriverImpl::Odbc(d) => d.columns_layout(),
            DriverImpl::Native(d) => d.columns_layout(),
        }
    }

    fn primary_key_layout(&self) -> PrimaryKeyLayout {
        match self {
            DriverImpl::Odbc(d) => d.primary_key_layout(),
            DriverImpl::Native(d) => d.primary_key_layout(),
        }
    }

    fn foreign_key_layout(&self) -> ForeignKeyLayout {
        match self {
            DriverImpl::Odbc(d) => d.foreign_key_layout(),
            DriverImpl::Native(d) => d.foreign_key_layout(),
        }
    }

    fn statistics_layout(&self) -> StatisticsLayout {
        match self {
            DriverImpl::Odbc(d) => d.statistics_layout(),
            DriverImpl::Native(d) => d.statistics_layout(),
        }
    }
}

impl DriverImpl {
    /// Driver for a configured profile.
    pub fn from_profile(profile: DriverProfile) -> Self {
        match profile {
            DriverProfile::Odbc => DriverImpl::Odbc(OdbcDriver::new()),
            DriverProfile::Native => DriverImpl::Native(NativeDriver::new()),
        }
    }

    /// Create a driver from its name.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver name is not recognized.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "odbc" | "pyodbc" => Ok(DriverImpl::Odbc(OdbcDriver::new())),
            "native" | "splicemachinesa" => Ok(DriverImpl::Native(NativeDriver::new())),
            other => Err(ReflectError::Config(format!(
                "Unknown driver: '{}'. Supported drivers: odbc, native",
                other
            ))),
        }
    }
}
