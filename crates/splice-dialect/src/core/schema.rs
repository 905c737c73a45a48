//! Reflected metadata descriptors.
//!
//! These are plain value records. Their serialized field names are what
//! callers key on (`name`, `type`, `nullable`, `constrained_columns`, ...)
//! and must not change.

use serde::Serialize;

use crate::typemap::ColumnType;

/// Kind of a named relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Table,
    View,
}

/// A table or view name found in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDescriptor {
    pub name: String,
    pub kind: TableKind,
    /// Owning schema as the caller named it; `None` for the default schema.
    pub schema: Option<String>,
}

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub nullable: bool,
    pub default: Option<String>,
    pub autoincrement: bool,
}

/// Primary key of a table, columns in key-sequence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryKeyDescriptor {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub table: String,
    /// Constraint name; `None` when the table has no primary key.
    pub name: Option<String>,
    pub constrained_columns: Vec<String>,
}

impl PrimaryKeyDescriptor {
    pub fn is_empty(&self) -> bool {
        self.constrained_columns.is_empty()
    }
}

/// Referential actions of a foreign key. Only non-default actions are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForeignKeyOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onupdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ondelete: Option<String>,
}

impl ForeignKeyOptions {
    pub fn is_empty(&self) -> bool {
        self.onupdate.is_none() && self.ondelete.is_none()
    }
}

/// Foreign key declared on a table.
///
/// `constrained_columns[i]` references `referred_columns[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyDescriptor {
    pub name: String,
    pub constrained_columns: Vec<String>,
    /// `None` when the referred table lives in the default schema and the
    /// caller did not name a schema.
    pub referred_schema: Option<String>,
    pub referred_table: String,
    pub referred_columns: Vec<String>,
    #[serde(skip_serializing_if = "ForeignKeyOptions::is_empty")]
    pub options: ForeignKeyOptions,
}

/// Foreign key on another table that references the reflected table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomingForeignKeyDescriptor {
    pub name: String,
    pub constrained_schema: Option<String>,
    pub constrained_table: String,
    pub constrained_columns: Vec<String>,
    pub referred_schema: Option<String>,
    pub referred_table: String,
    pub referred_columns: Vec<String>,
    #[serde(skip_serializing_if = "ForeignKeyOptions::is_empty")]
    pub options: ForeignKeyOptions,
}

/// Index metadata, columns in index order.
///
/// Unlike the other descriptors, index and column names keep the case the
/// catalog stores them in (`IDX1`, `["A", "B"]`), so an index column can
/// differ in case from the matching [`ColumnDescriptor::name`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDescriptor {
    pub name: String,
    pub unique: bool,
    pub column_names: Vec<String>,
}

/// Everything reflected for one table in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReflectedTable {
    pub schema: Option<String>,
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    pub primary_key: PrimaryKeyDescriptor,
    pub foreign_keys: Vec<ForeignKeyDescriptor>,
    pub incoming_foreign_keys: Vec<IncomingForeignKeyDescriptor>,
    pub indexes: Vec<IndexDescriptor>,
}

impl ReflectedTable {
    /// Get the fully qualified table name.
    pub fn full_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }

    /// Find a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Check if a column is part of the primary key.
    pub fn is_pk_column(&self, name: &str) -> bool {
        self.primary_key.constrained_columns.iter().any(|c| c == name)
    }
}
