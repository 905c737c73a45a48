//! Index extraction from `SYSIBM.SQLSTATISTICS`.

use tracing::debug;

use super::Scope;
use crate::catalog::merge::KeyedMerge;
use crate::catalog::query::CatalogQuery;
use crate::catalog::rows::StatisticsLayout;
use crate::core::identifier::denormalize_name;
use crate::core::schema::IndexDescriptor;
use crate::core::traits::Connection;
use crate::error::Result;

/// Indexes of a table in first-seen order.
///
/// Index and column names are reported exactly as the catalog stores them.
/// Table-statistic rows, which have no index name, are skipped.
pub async fn indexes(
    conn: &mut dyn Connection,
    layout: StatisticsLayout,
    scope: Scope<'_>,
    table: &str,
) -> Result<Vec<IndexDescriptor>> {
    let schema = scope.catalog_schema();
    let table = denormalize_name(table);
    let sql = CatalogQuery::Statistics {
        schema: &schema,
        table: &table,
    }
    .to_sql()?;
    let result = conn.execute(&sql).await?;
    if result.is_empty() {
        return Ok(Vec::new());
    }

    let bound = layout.bind(&result)?;
    let mut merged = KeyedMerge::new();
    for row in result.rows() {
        let Some(stat) = bound.read(row)? else {
            continue;
        };
        merged.merge(
            stat.index_name,
            || IndexDescriptor {
                name: stat.index_name.to_string(),
                unique: !stat.non_unique,
                column_names: Vec::new(),
            },
            |index| index.column_names.push(stat.column.to_string()),
        );
    }

    let indexes = merged.into_records();
    debug!("Loaded {} indexes for {}.{}", indexes.len(), schema, table);
    Ok(indexes)
}
