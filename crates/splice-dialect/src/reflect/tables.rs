//! Schema, table, and view names, view definitions, and existence checks.

use tracing::debug;

use super::Scope;
use crate::catalog::query::{CatalogQuery, TableType};
use crate::catalog::resolver::resolve_schema_id;
use crate::core::identifier::{denormalize_name, normalize_name};
use crate::core::traits::Connection;
use crate::error::Result;

/// Names of all non-system schemas, sorted by the catalog.
pub async fn schema_names(conn: &mut dyn Connection, system_prefix: &str) -> Result<Vec<String>> {
    let sql = CatalogQuery::SchemaNames {
        exclude_prefix: system_prefix,
    }
    .to_sql()?;
    let result = conn.execute(&sql).await?;
    Ok(result.first_column().map(normalize_name).collect())
}

/// Names of relations of the given types in the scoped schema.
///
/// An unknown schema has no tables. Names keep catalog order.
pub async fn relation_names(
    conn: &mut dyn Connection,
    scope: Scope<'_>,
    types: &[TableType],
    lowercase: bool,
) -> Result<Vec<String>> {
    let Some(schema_id) = resolve_schema_id(conn, scope.schema, scope.default_schema).await?
    else {
        debug!("Schema {} not found", scope.catalog_schema());
        return Ok(Vec::new());
    };

    let sql = CatalogQuery::TableNames {
        schema_id: schema_id.as_str(),
        types,
    }
    .to_sql()?;
    let result = conn.execute(&sql).await?;

    let names: Vec<String> = result
        .first_column()
        .map(|name| {
            let name = normalize_name(name);
            if lowercase {
                name.to_lowercase()
            } else {
                name
            }
        })
        .collect();
    debug!("Found {} relations in {}", names.len(), scope.catalog_schema());
    Ok(names)
}

/// Stored text of a view, or `None` if the schema or view does not exist.
pub async fn view_definition(
    conn: &mut dyn Connection,
    scope: Scope<'_>,
    view: &str,
) -> Result<Option<String>> {
    let Some(schema_id) = resolve_schema_id(conn, scope.schema, scope.default_schema).await?
    else {
        return Ok(None);
    };

    let view = denormalize_name(view);
    let sql = CatalogQuery::TableId {
        schema_id: schema_id.as_str(),
        table: &view,
        only_views: true,
    }
    .to_sql()?;
    let table_id = match conn.execute(&sql).await?.first_value() {
        Some(id) => id.to_string(),
        None => return Ok(None),
    };

    let sql = CatalogQuery::ViewDefinition {
        table_id: &table_id,
    }
    .to_sql()?;
    Ok(conn.execute(&sql).await?.first_value().map(str::to_string))
}

/// True if a table or view with this name exists in the scoped schema.
pub async fn has_table(conn: &mut dyn Connection, scope: Scope<'_>, table: &str) -> Result<bool> {
    let schema = scope.catalog_schema();
    let table = denormalize_name(table);
    let sql = CatalogQuery::TableExists {
        schema: &schema,
        table: &table,
    }
    .to_sql()?;
    Ok(!conn.execute(&sql).await?.is_empty())
}

/// True if the sequence exists in the scoped schema.
pub async fn has_sequence(
    conn: &mut dyn Connection,
    scope: Scope<'_>,
    sequence: &str,
) -> Result<bool> {
    let Some(schema_id) = resolve_schema_id(conn, scope.schema, scope.default_schema).await?
    else {
        return Ok(false);
    };

    let sequence = denormalize_name(sequence);
    let sql = CatalogQuery::SequenceExists {
        schema_id: schema_id.as_str(),
        sequence: &sequence,
    }
    .to_sql()?;
    Ok(!conn.execute(&sql).await?.is_empty())
}
