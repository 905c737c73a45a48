//! Core traits for catalog reflection.
//!
//! - [`Connection`]: executes catalog query text on a live connection
//! - [`CatalogDriver`]: what differs between the ODBC and native drivers
//!
//! # Design Patterns
//!
//! - **Strategy**: a `CatalogDriver` supplies the default schema and the
//!   row layouts the extractors read
//! - **Template Method**: default methods carry the layouts both drivers share

use async_trait::async_trait;

use crate::catalog::query::TableType;
use crate::catalog::rows::{ColumnsLayout, ForeignKeyLayout, PrimaryKeyLayout, StatisticsLayout};
use crate::error::Result;

use super::value::RowSet;

/// A live database connection that can run catalog queries.
///
/// Statements are executed one at a time and the full result is returned.
/// Failures surface as [`crate::ReflectError::CatalogUnavailable`].
#[async_trait]
pub trait Connection: Send {
    /// Execute query text and return its header and rows.
    async fn execute(&mut self, sql: &str) -> Result<RowSet>;
}

/// Driver-specific catalog behavior.
#[async_trait]
pub trait CatalogDriver: Send + Sync {
    /// Driver name (e.g., "odbc", "native").
    fn name(&self) -> &str;

    /// Schema used when a call names none.
    async fn current_schema(&self, conn: &mut dyn Connection) -> Result<String>;

    /// Table types listed by `get_table_names`.
    fn table_types(&self) -> &'static [TableType] {
        &[TableType::Table]
    }

    /// Row layout of `SYSIBM.SQLCOLUMNS`.
    fn columns_layout(&self) -> ColumnsLayout;

    /// Row layout of `SYSIBM.SQLPRIMARYKEYS`.
    fn primary_key_layout(&self) -> PrimaryKeyLayout {
        PrimaryKeyLayout::SYSIBM
    }

    /// Row layout of `SYSIBM.SQLFOREIGNKEYS`.
    fn foreign_key_layout(&self) -> ForeignKeyLayout {
        ForeignKeyLayout::SYSIBM
    }

    /// Header names read from `SYSIBM.SQLSTATISTICS`.
    fn statistics_layout(&self) -> StatisticsLayout {
        StatisticsLayout::SYSIBM
    }
}
