//! Splice Machine native wire driver.
//!
//! The native driver reports nullability as the `NULLABLE` code and has no
//! way to ask for the session schema, so the default schema is fixed.

use async_trait::async_trait;

use crate::catalog::rows::ColumnsLayout;
use crate::core::traits::{CatalogDriver, Connection};
use crate::error::Result;

/// Default schema of every Splice Machine database.
pub const DEFAULT_SCHEMA: &str = "SPLICE";

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeDriver;

impl NativeDriver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CatalogDriver for NativeDriver {
    fn name(&self) -> &str {
        "native"
    }

    async fn current_schema(&self, _conn: &mut dyn Connection) -> Result<String> {
        Ok(DEFAULT_SCHEMA.to_string())
    }

    fn columns_layout(&self) -> ColumnsLayout {
        ColumnsLayout::NATIVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::query::TableType;
    use crate::testing::ScriptedConnection;

    #[tokio::test]
    async fn test_current_schema_is_constant() {
        let mut conn = ScriptedConnection::new();
        let schema = NativeDriver::new().current_schema(&mut conn).await.unwrap();
        assert_eq!(schema, "SPLICE");
        assert!(conn.executed.is_empty());
    }

    #[test]
    fn test_layouts() {
        let driver = NativeDriver::new();
        assert_eq!(driver.table_types(), &[TableType::Table]);
        assert_eq!(driver.columns_layout(), ColumnsLayout::NATIVE);
    }
}
