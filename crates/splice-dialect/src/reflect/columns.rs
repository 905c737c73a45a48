//! Column extraction from `SYSIBM.SQLCOLUMNS`.

use tracing::debug;

use super::Scope;
use crate::catalog::query::CatalogQuery;
use crate::catalog::rows::ColumnsLayout;
use crate::core::identifier::{denormalize_name, normalize_name};
use crate::core::schema::ColumnDescriptor;
use crate::core::traits::Connection;
use crate::error::Result;
use crate::typemap::{resolve_column_type, TypeFields};

/// Columns of a table in physical order.
///
/// A table that does not exist has no columns.
pub async fn columns(
    conn: &mut dyn Connection,
    layout: ColumnsLayout,
    scope: Scope<'_>,
    table: &str,
) -> Result<Vec<ColumnDescriptor>> {
    let schema = scope.catalog_schema();
    let table = denormalize_name(table);
    let sql = CatalogQuery::Columns {
        schema: &schema,
        table: &table,
    }
    .to_sql()?;
    let result = conn.execute(&sql).await?;

    let mut columns = Vec::with_capacity(result.len());
    for row in result.rows() {
        let raw = layout.read(row)?;
        let column_type = resolve_column_type(TypeFields {
            column: raw.name,
            type_name: raw.type_name,
            size: raw.size,
            digits: raw.digits,
        })?;
        columns.push(ColumnDescriptor {
            name: normalize_name(raw.name),
            column_type,
            nullable: raw.nullable,
            default: raw.default.map(str::to_string),
            autoincrement: raw.autoincrement,
        });
    }

    debug!("Loaded {} columns for {}.{}", columns.len(), schema, table);
    Ok(columns)
}
