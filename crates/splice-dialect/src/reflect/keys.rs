//! Primary and foreign key extraction.

use tracing::debug;

use super::Scope;
use crate::catalog::merge::merge_by_key;
use crate::catalog::query::{CatalogQuery, KeyDirection};
use crate::catalog::rows::{ForeignKeyLayout, ForeignKeyRow, PrimaryKeyLayout};
use crate::core::identifier::{denormalize_name, normalize_name};
use crate::core::schema::{
    ForeignKeyDescriptor, ForeignKeyOptions, IncomingForeignKeyDescriptor, PrimaryKeyDescriptor,
};
use crate::core::traits::Connection;
use crate::error::Result;

/// Primary key of a table.
///
/// Columns come back in the order the catalog returns them, which is
/// key-sequence order. A table without a primary key yields an empty
/// column list and no name.
pub async fn primary_key(
    conn: &mut dyn Connection,
    layout: PrimaryKeyLayout,
    scope: Scope<'_>,
    table: &str,
) -> Result<PrimaryKeyDescriptor> {
    let schema = scope.catalog_schema();
    let table = denormalize_name(table);
    let sql = CatalogQuery::PrimaryKeys {
        schema: &schema,
        table: &table,
    }
    .to_sql()?;
    let result = conn.execute(&sql).await?;

    let mut pk = PrimaryKeyDescriptor {
        table: normalize_name(&table),
        name: None,
        constrained_columns: Vec::with_capacity(result.len()),
    };
    for row in result.rows() {
        let raw = layout.read(row)?;
        if pk.name.is_none() {
            pk.name = raw.name.map(normalize_name);
        }
        pk.constrained_columns.push(normalize_name(raw.column));
    }

    debug!(
        "Loaded {} primary key columns for {}.{}",
        pk.constrained_columns.len(),
        schema,
        table
    );
    Ok(pk)
}

/// Run `SQLFOREIGNKEYS` and read every row.
async fn foreign_key_rows(
    conn: &mut dyn Connection,
    layout: ForeignKeyLayout,
    scope: Scope<'_>,
    table: &str,
    direction: KeyDirection,
) -> Result<Vec<OwnedForeignKeyRow>> {
    let schema = scope.catalog_schema();
    let table = denormalize_name(table);
    let sql = CatalogQuery::ForeignKeys {
        schema: &schema,
        table: &table,
        direction,
    }
    .to_sql()?;
    let result = conn.execute(&sql).await?;

    let rows = result
        .rows()
        .iter()
        .map(|row| layout.read(row).map(OwnedForeignKeyRow::from))
        .collect::<Result<Vec<_>>>()?;
    debug!(
        "Loaded {} {:?} foreign key rows for {}.{}",
        rows.len(),
        direction,
        schema,
        table
    );
    Ok(rows)
}

/// Foreign keys declared on a table, one record per constraint.
///
/// The referred schema is `None` when it is the default schema and the
/// caller did not name a schema.
pub async fn foreign_keys(
    conn: &mut dyn Connection,
    layout: ForeignKeyLayout,
    scope: Scope<'_>,
    table: &str,
) -> Result<Vec<ForeignKeyDescriptor>> {
    let rows = foreign_key_rows(conn, layout, scope, table, KeyDirection::Outgoing).await?;

    Ok(merge_by_key(
        rows,
        |r| r.name.as_str(),
        |r| ForeignKeyDescriptor {
            name: normalize_name(&r.name),
            constrained_columns: Vec::new(),
            referred_schema: scope.report_schema(r.referred_schema.as_deref()),
            referred_table: normalize_name(&r.referred_table),
            referred_columns: Vec::new(),
            options: r.options(),
        },
        |fk, r| {
            fk.constrained_columns.push(normalize_name(&r.constrained_column));
            fk.referred_columns.push(normalize_name(&r.referred_column));
        },
    ))
}

/// Foreign keys on other tables that reference this table.
pub async fn incoming_foreign_keys(
    conn: &mut dyn Connection,
    layout: ForeignKeyLayout,
    scope: Scope<'_>,
    table: &str,
) -> Result<Vec<IncomingForeignKeyDescriptor>> {
    let rows = foreign_key_rows(conn, layout, scope, table, KeyDirection::Incoming).await?;
    let referred_schema = scope.caller_schema();

    Ok(merge_by_key(
        rows,
        |r| r.name.as_str(),
        |r| IncomingForeignKeyDescriptor {
            name: normalize_name(&r.name),
            constrained_schema: scope.report_schema(r.constrained_schema.as_deref()),
            constrained_table: normalize_name(&r.constrained_table),
            constrained_columns: Vec::new(),
            referred_schema: referred_schema.clone(),
            referred_table: normalize_name(&r.referred_table),
            referred_columns: Vec::new(),
            options: r.options(),
        },
        |fk, r| {
            fk.constrained_columns.push(normalize_name(&r.constrained_column));
            fk.referred_columns.push(normalize_name(&r.referred_column));
        },
    ))
}

/// A foreign key row detached from its result set.
#[derive(Debug, Clone)]
struct OwnedForeignKeyRow {
    name: String,
    referred_schema: Option<String>,
    referred_table: String,
    referred_column: String,
    constrained_schema: Option<String>,
    constrained_table: String,
    constrained_column: String,
    update_rule: Option<&'static str>,
    delete_rule: Option<&'static str>,
}

impl OwnedForeignKeyRow {
    fn options(&self) -> ForeignKeyOptions {
        ForeignKeyOptions {
            onupdate: self.update_rule.map(str::to_string),
            ondelete: self.delete_rule.map(str::to_string),
        }
    }
}

impl From<ForeignKeyRow<'_>> for OwnedForeignKeyRow {
    fn from(row: ForeignKeyRow<'_>) -> Self {
        Self {
            name: row.name.to_string(),
            referred_schema: row.referred_schema.map(str::to_string),
            referred_table: row.referred_table.to_string(),
            referred_column: row.referred_column.to_string(),
            constrained_schema: row.constrained_schema.map(str::to_string),
            constrained_table: row.constrained_table.to_string(),
            constrained_column: row.constrained_column.to_string(),
            update_rule: row.update_rule,
            delete_rule: row.delete_rule,
        }
    }
}
