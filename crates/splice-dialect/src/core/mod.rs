//! Core abstractions for catalog reflection.
//!
//! - [`schema`]: reflected descriptors (columns, keys, indexes)
//! - [`value`]: catalog result rows
//! - [`traits`]: the connection and driver seams
//! - [`identifier`]: name normalization and literal escaping
//!
//! Extractors depend only on these types, never on a concrete driver, so a
//! scripted [`Connection`] is enough to exercise all of them.

pub mod identifier;
pub mod schema;
pub mod traits;
pub mod value;

// Re-export commonly used types for convenience
pub use schema::{
    ColumnDescriptor, ForeignKeyDescriptor, ForeignKeyOptions, IncomingForeignKeyDescriptor,
    IndexDescriptor, PrimaryKeyDescriptor, ReflectedTable, TableDescriptor, TableKind,
};
pub use traits::{CatalogDriver, Connection};
pub use value::{Row, RowSet};
