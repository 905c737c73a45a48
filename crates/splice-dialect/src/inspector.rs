//! Per-pass reflection cache.
//!
//! An [`Inspector`] pairs a dialect with one live connection and remembers
//! every answer it has fetched, keyed by operation, object name, and schema.
//! Asking the same question twice in a pass costs one catalog round trip.
//! Call [`Inspector::clear_cache`] to start a new pass.

use std::collections::HashMap;

use tracing::debug;

use crate::core::schema::{
    ColumnDescriptor, ForeignKeyDescriptor, IncomingForeignKeyDescriptor, IndexDescriptor,
    PrimaryKeyDescriptor, ReflectedTable,
};
use crate::core::traits::Connection;
use crate::dialect::SpliceDialect;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Operation {
    SchemaNames,
    TableNames,
    ViewNames,
    ViewDefinition,
    HasTable,
    HasSequence,
    Columns,
    PkConstraint,
    ForeignKeys,
    IncomingForeignKeys,
    Indexes,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    operation: Operation,
    name: String,
    schema: Option<String>,
}

impl CacheKey {
    fn new(operation: Operation, name: &str, schema: Option<&str>) -> Self {
        Self {
            operation,
            name: name.to_string(),
            schema: schema.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone)]
enum Cached {
    Flag(bool),
    Text(Option<String>),
    Names(Vec<String>),
    Columns(Vec<ColumnDescriptor>),
    PrimaryKey(PrimaryKeyDescriptor),
    ForeignKeys(Vec<ForeignKeyDescriptor>),
    IncomingForeignKeys(Vec<IncomingForeignKeyDescriptor>),
    Indexes(Vec<IndexDescriptor>),
}

/// Look up `$key`; on a miss evaluate `$fetch`, store it, and return it.
macro_rules! cached {
    ($self:ident, $key:expr, $variant:ident, $fetch:expr) => {{
        let key = $key;
        if let Some(Cached::$variant(value)) = $self.cache.get(&key) {
            return Ok(value.clone());
        }
        let value = $fetch;
        $self.cache.insert(key, Cached::$variant(value.clone()));
        Ok(value)
    }};
}

/// Caching front end over [`SpliceDialect`] for one reflection pass.
pub struct Inspector<'a> {
    dialect: &'a SpliceDialect,
    conn: &'a mut dyn Connection,
    cache: HashMap<CacheKey, Cached>,
}

impl<'a> Inspector<'a> {
    pub fn new(dialect: &'a SpliceDialect, conn: &'a mut dyn Connection) -> Self {
        Self {
            dialect,
            conn,
            cache: HashMap::new(),
        }
    }

    /// Number of cached answers.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    /// Forget everything fetched so far.
    pub fn clear_cache(&mut self) {
        debug!("Clearing {} cached reflection results", self.cache.len());
        self.cache.clear();
    }

    /// Default schema in catalog case. The dialect records it once.
    pub async fn default_schema_name(&mut self) -> Result<String> {
        self.dialect.default_schema_name(&mut *self.conn).await
    }

    pub async fn get_schema_names(&mut self) -> Result<Vec<String>> {
        cached!(
            self,
            CacheKey::new(Operation::SchemaNames, "", None),
            Names,
            self.dialect.get_schema_names(&mut *self.conn).await?
        )
    }

    pub async fn get_table_names(&mut self, schema: Option<&str>) -> Result<Vec<String>> {
        cached!(
            self,
            CacheKey::new(Operation::TableNames, "", schema),
            Names,
            self.dialect.get_table_names(&mut *self.conn, schema).await?
        )
    }

    pub async fn get_view_names(&mut self, schema: Option<&str>) -> Result<Vec<String>> {
        cached!(
            self,
            CacheKey::new(Operation::ViewNames, "", schema),
            Names,
            self.dialect.get_view_names(&mut *self.conn, schema).await?
        )
    }

    pub async fn get_view_definition(
        &mut self,
        view: &str,
        schema: Option<&str>,
    ) -> Result<Option<String>> {
        cached!(
            self,
            CacheKey::new(Operation::ViewDefinition, view, schema),
            Text,
            self.dialect
                .get_view_definition(&mut *self.conn, view, schema)
                .await?
        )
    }

    pub async fn has_table(&mut self, table: &str, schema: Option<&str>) -> Result<bool> {
        cached!(
            self,
            CacheKey::new(Operation::HasTable, table, schema),
            Flag,
            self.dialect.has_table(&mut *self.conn, table, schema).await?
        )
    }

    pub async fn has_sequence(&mut self, sequence: &str, schema: Option<&str>) -> Result<bool> {
        cached!(
            self,
            CacheKey::new(Operation::HasSequence, sequence, schema),
            Flag,
            self.dialect
                .has_sequence(&mut *self.conn, sequence, schema)
                .await?
        )
    }

    pub async fn get_columns(
        &mut self,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ColumnDescriptor>> {
        cached!(
            self,
            CacheKey::new(Operation::Columns, table, schema),
            Columns,
            self.dialect.get_columns(&mut *self.conn, table, schema).await?
        )
    }

    pub async fn get_pk_constraint(
        &mut self,
        table: &str,
        schema: Option<&str>,
    ) -> Result<PrimaryKeyDescriptor> {
        cached!(
            self,
            CacheKey::new(Operation::PkConstraint, table, schema),
            PrimaryKey,
            self.dialect
                .get_pk_constraint(&mut *self.conn, table, schema)
                .await?
        )
    }

    /// Primary key column names, served from the cached constraint.
    pub async fn get_primary_keys(
        &mut self,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<String>> {
        Ok(self
            .get_pk_constraint(table, schema)
            .await?
            .constrained_columns)
    }

    pub async fn get_foreign_keys(
        &mut self,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ForeignKeyDescriptor>> {
        cached!(
            self,
            CacheKey::new(Operation::ForeignKeys, table, schema),
            ForeignKeys,
            self.dialect
                .get_foreign_keys(&mut *self.conn, table, schema)
                .await?
        )
    }

    pub async fn get_incoming_foreign_keys(
        &mut self,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<IncomingForeignKeyDescriptor>> {
        cached!(
            self,
            CacheKey::new(Operation::IncomingForeignKeys, table, schema),
            IncomingForeignKeys,
            self.dialect
                .get_incoming_foreign_keys(&mut *self.conn, table, schema)
                .await?
        )
    }

    pub async fn get_indexes(
        &mut self,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<IndexDescriptor>> {
        cached!(
            self,
            CacheKey::new(Operation::Indexes, table, schema),
            Indexes,
            self.dialect.get_indexes(&mut *self.conn, table, schema).await?
        )
    }

    /// Everything known about one table.
    pub async fn reflect_table(
        &mut self,
        table: &str,
        schema: Option<&str>,
    ) -> Result<ReflectedTable> {
        let columns = self.get_columns(table, schema).await?;
        let primary_key = self.get_pk_constraint(table, schema).await?;
        let foreign_keys = self.get_foreign_keys(table, schema).await?;
        let incoming_foreign_keys = self.get_incoming_foreign_keys(table, schema).await?;
        let indexes = self.get_indexes(table, schema).await?;

        Ok(ReflectedTable {
            schema: schema.map(|s| self.dialect.normalize_name(s)),
            name: self.dialect.normalize_name(table),
            columns,
            primary_key,
            foreign_keys,
            incoming_foreign_keys,
            indexes,
        })
    }
}
