//! Catalog access: query text, row adapters, schema ids, and row merging.
//!
//! - [`query`]: one [`CatalogQuery`] per lookup, rendered with escaped literals
//! - [`rows`]: named-field adapters over positional procedure rows
//! - [`resolver`]: schema name to `SCHEMAID`
//! - [`merge`]: folding per-column rows into per-constraint records

pub mod merge;
pub mod query;
pub mod resolver;
pub mod rows;

pub use merge::{merge_by_key, KeyedMerge};
pub use query::{CatalogQuery, KeyDirection, TableType};
pub use resolver::{resolve_schema_id, SchemaId};
pub use rows::{ColumnsLayout, ForeignKeyLayout, NullableField, PrimaryKeyLayout, StatisticsLayout};
