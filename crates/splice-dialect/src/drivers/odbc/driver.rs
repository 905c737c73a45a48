//! Catalog behavior of the ODBC driver.

use async_trait::async_trait;

use crate::catalog::query::{CatalogQuery, TableType};
use crate::catalog::rows::ColumnsLayout;
use crate::core::traits::{CatalogDriver, Connection};
use crate::error::{ReflectError, Result};

/// The ODBC driver asks the server for its current schema and lists
/// external tables alongside regular ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct OdbcDriver;

impl OdbcDriver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CatalogDriver for OdbcDriver {
    fn name(&self) -> &str {
        "odbc"
    }

    async fn current_schema(&self, conn: &mut dyn Connection) -> Result<String> {
        let sql = CatalogQuery::CurrentSchema.to_sql()?;
        let result = conn.execute(&sql).await?;
        result
            .first_value()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ReflectError::catalog(sql, "server returned no current schema"))
    }

    fn table_types(&self) -> &'static [TableType] {
        &[TableType::Table, TableType::External]
    }

    fn columns_layout(&self) -> ColumnsLayout {
        ColumnsLayout::ODBC
    }
}
