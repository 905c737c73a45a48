//! The Splice Machine dialect facade.
//!
//! [`SpliceDialect`] is the entry point a reflection framework calls. Every
//! operation borrows a live [`Connection`] for the duration of the call and
//! returns plain descriptors; the only state kept between calls is the
//! default schema recorded by [`SpliceDialect::initialize`].

use std::sync::OnceLock;

use tracing::info;

use crate::catalog::query::TableType;
use crate::config::{Config, ReflectionConfig};
use crate::core::identifier;
use crate::core::schema::{
    ColumnDescriptor, ForeignKeyDescriptor, IncomingForeignKeyDescriptor, IndexDescriptor,
    PrimaryKeyDescriptor,
};
use crate::core::traits::{CatalogDriver, Connection};
use crate::drivers::DriverImpl;
use crate::error::Result;
use crate::reflect::{columns, indexes, keys, tables, Scope};

/// Schema reflection for Splice Machine.
#[derive(Debug)]
pub struct SpliceDialect {
    driver: DriverImpl,
    options: ReflectionConfig,
    default_schema: OnceLock<String>,
}

impl SpliceDialect {
    pub fn new(driver: DriverImpl, options: ReflectionConfig) -> Self {
        Self {
            driver,
            options,
            default_schema: OnceLock::new(),
        }
    }

    /// Build a dialect for the driver profile and options in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            DriverImpl::from_profile(config.connection.driver),
            config.reflection.clone(),
        )
    }

    /// The driver profile in use.
    pub fn driver(&self) -> &DriverImpl {
        &self.driver
    }

    /// Reflection options in use.
    pub fn options(&self) -> &ReflectionConfig {
        &self.options
    }

    /// Record the default schema for this dialect.
    ///
    /// A configured `default_schema` wins; otherwise the driver is asked.
    /// Later calls return the recorded value without touching `conn`.
    pub async fn initialize(&self, conn: &mut dyn Connection) -> Result<String> {
        if let Some(schema) = self.default_schema.get() {
            return Ok(schema.clone());
        }

        let schema = match &self.options.default_schema {
            Some(schema) => identifier::denormalize_name(schema),
            None => self.driver.current_schema(conn).await?,
        };
        info!(
            "Default schema for {} driver: {}",
            self.driver.name(),
            schema
        );
        Ok(self.default_schema.get_or_init(|| schema).clone())
    }

    /// Default schema in catalog case.
    pub async fn default_schema_name(&self, conn: &mut dyn Connection) -> Result<String> {
        self.initialize(conn).await
    }

    /// True if a table or view exists.
    pub async fn has_table(
        &self,
        conn: &mut dyn Connection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<bool> {
        let default_schema = self.initialize(conn).await?;
        tables::has_table(conn, Scope::new(schema, &default_schema), table).await
    }

    /// True if a sequence exists.
    pub async fn has_sequence(
        &self,
        conn: &mut dyn Connection,
        sequence: &str,
        schema: Option<&str>,
    ) -> Result<bool> {
        let default_schema = self.initialize(conn).await?;
        tables::has_sequence(conn, Scope::new(schema, &default_schema), sequence).await
    }

    /// Names of all non-system schemas.
    pub async fn get_schema_names(&self, conn: &mut dyn Connection) -> Result<Vec<String>> {
        tables::schema_names(conn, &self.options.system_schema_prefix).await
    }

    /// Names of tables in a schema.
    pub async fn get_table_names(
        &self,
        conn: &mut dyn Connection,
        schema: Option<&str>,
    ) -> Result<Vec<String>> {
        let default_schema = self.initialize(conn).await?;
        tables::relation_names(
            conn,
            Scope::new(schema, &default_schema),
            self.driver.table_types(),
            self.options.lowercase_names,
        )
        .await
    }

    /// Names of views in a schema.
    pub async fn get_view_names(
        &self,
        conn: &mut dyn Connection,
        schema: Option<&str>,
    ) -> Result<Vec<String>> {
        let default_schema = self.initialize(conn).await?;
        tables::relation_names(
            conn,
            Scope::new(schema, &default_schema),
            &[TableType::View],
            self.options.lowercase_names,
        )
        .await
    }

    /// Stored text of a view.
    pub async fn get_view_definition(
        &self,
        conn: &mut dyn Connection,
        view: &str,
        schema: Option<&str>,
    ) -> Result<Option<String>> {
        let default_schema = self.initialize(conn).await?;
        tables::view_definition(conn, Scope::new(schema, &default_schema), view).await
    }

    pub async fn get_columns(
        &self,
        conn: &mut dyn Connection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ColumnDescriptor>> {
        let default_schema = self.initialize(conn).await?;
        columns::columns(
            conn,
            self.driver.columns_layout(),
            Scope::new(schema, &default_schema),
            table,
        )
        .await
    }

    /// Primary key column names in key order.
    pub async fn get_primary_keys(
        &self,
        conn: &mut dyn Connection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<String>> {
        Ok(self
            .get_pk_constraint(conn, table, schema)
            .await?
            .constrained_columns)
    }

    pub async fn get_pk_constraint(
        &self,
        conn: &mut dyn Connection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<PrimaryKeyDescriptor> {
        let default_schema = self.initialize(conn).await?;
        keys::primary_key(
            conn,
            self.driver.primary_key_layout(),
            Scope::new(schema, &default_schema),
            table,
        )
        .await
    }

    /// Foreign keys declared on `table`.
    pub async fn get_foreign_keys(
        &self,
        conn: &mut dyn Connection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ForeignKeyDescriptor>> {
        let default_schema = self.initialize(conn).await?;
        keys::foreign_keys(
            conn,
            self.driver.foreign_key_layout(),
            Scope::new(schema, &default_schema),
            table,
        )
        .await
    }

    /// Foreign keys on other tables that reference `table`.
    pub async fn get_incoming_foreign_keys(
        &self,
        conn: &mut dyn Connection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<IncomingForeignKeyDescriptor>> {
        let default_schema = self.initialize(conn).await?;
        keys::incoming_foreign_keys(
            conn,
            self.driver.foreign_key_layout(),
            Scope::new(schema, &default_schema),
            table,
        )
        .await
    }

    pub async fn get_indexes(
        &self,
        conn: &mut dyn Connection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<IndexDescriptor>> {
        let default_schema = self.initialize(conn).await?;
        indexes::indexes(
            conn,
            self.driver.statistics_layout(),
            Scope::new(schema, &default_schema),
            table,
        )
        .await
    }

    /// Catalog name to caller name. See [`identifier::normalize_name`].
    pub fn normalize_name(&self, name: &str) -> String {
        identifier::normalize_name(name)
    }

    /// Caller name to catalog name. See [`identifier::denormalize_name`].
    pub fn denormalize_name(&self, name: &str) -> String {
        identifier::denormalize_name(name)
    }
}
