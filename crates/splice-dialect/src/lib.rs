//! # splice-dialect
//!
//! Schema reflection for the Splice Machine database.
//!
//! This library discovers tables, views, columns, primary keys, foreign keys,
//! and indexes by querying Splice Machine's system catalog, and returns them
//! as backend-agnostic descriptors:
//!
//! - **Catalog queries** against `SYS.*` tables and `SYSIBM` procedures
//! - **Identifier normalization** between upper-case catalog storage and
//!   lower-case caller names
//! - **Driver profiles** for the ODBC and native wire drivers
//! - **Per-pass caching** through [`Inspector`]
//! - **ODBC connections** via `odbc-api` (feature `odbc`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use splice_dialect::{Config, Inspector, OdbcConnection, SpliceDialect};
//!
//! #[tokio::main]
//! async fn main() -> splice_dialect::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let dialect = SpliceDialect::from_config(&config);
//!     let mut conn = OdbcConnection::connect(&config.connection).await?;
//!
//!     let mut inspector = Inspector::new(&dialect, &mut conn);
//!     for table in inspector.get_table_names(None).await? {
//!         let reflected = inspector.reflect_table(&table, None).await?;
//!         println!("{} has {} columns", reflected.full_name(), reflected.columns.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod dialect;
pub mod drivers;
pub mod error;
pub mod inspector;
pub mod reflect;
pub mod typemap;

#[cfg(test)]
mod testing;

// Re-exports for convenient access
pub use config::{Config, ConnectionConfig, DriverProfile, ReflectionConfig};
pub use crate::core::{
    CatalogDriver, ColumnDescriptor, Connection, ForeignKeyDescriptor, ForeignKeyOptions,
    IncomingForeignKeyDescriptor, IndexDescriptor, PrimaryKeyDescriptor, ReflectedTable, Row,
    RowSet, TableDescriptor, TableKind,
};
pub use dialect::SpliceDialect;
#[cfg(feature = "odbc")]
pub use drivers::OdbcConnection;
pub use drivers::{DriverImpl, NativeDriver, OdbcDriver};
pub use error::{ReflectError, Result};
pub use inspector::Inspector;
pub use typemap::ColumnType;
