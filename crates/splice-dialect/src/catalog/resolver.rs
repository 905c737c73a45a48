//! Schema name to catalog id resolution.

use std::fmt;

use tracing::debug;

use crate::catalog::query::CatalogQuery;
use crate::core::traits::Connection;
use crate::error::Result;

/// Catalog `SCHEMAID` of a schema. Only valid for the call that resolved it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaId(String);

impl SchemaId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve `schema`, or `default_schema` when absent, to its catalog id.
///
/// The name is upper-cased before the lookup, so `splice`, `Splice` and
/// `SPLICE` all resolve to the same schema. Returns `None` when no schema
/// matches. If the catalog ever holds duplicate names the first row wins.
pub async fn resolve_schema_id(
    conn: &mut dyn Connection,
    schema: Option<&str>,
    default_schema: &str,
) -> Result<Option<SchemaId>> {
    let name = schema.unwrap_or(default_schema).to_uppercase();
    let sql = CatalogQuery::SchemaId { schema: &name }.to_sql()?;
    let result = conn.execute(&sql).await?;

    let id = result.first_value().map(|id| SchemaId(id.to_string()));
    debug!("Resolved schema {} to {:?}", name, id);
    Ok(id)
}
