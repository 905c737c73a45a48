//! Catalog query text.
//!
//! Every metadata lookup is one [`CatalogQuery`] variant. Names are
//! validated and rendered as escaped string literals; nothing reaches the
//! query text unescaped. Names must already be in catalog case.

use std::fmt;

use crate::core::identifier::literal;
use crate::error::Result;

/// `TABLETYPE` codes in `SYS.SYSTABLES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableType {
    /// Regular table ('T').
    Table,
    /// External table ('E').
    External,
    /// View ('V').
    View,
}

impl TableType {
    pub fn code(&self) -> char {
        match self {
            TableType::Table => 'T',
            TableType::External => 'E',
            TableType::View => 'V',
        }
    }
}

/// Which side of a foreign key the reflected table is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    /// Keys declared on the table (exported keys).
    Outgoing,
    /// Keys on other tables that reference the table (imported keys).
    Incoming,
}

/// A catalog lookup, rendered to SQL with [`CatalogQuery::to_sql`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogQuery<'a> {
    CurrentSchema,
    SchemaId {
        schema: &'a str,
    },
    SchemaNames {
        exclude_prefix: &'a str,
    },
    TableExists {
        schema: &'a str,
        table: &'a str,
    },
    SequenceExists {
        schema_id: &'a str,
        sequence: &'a str,
    },
    TableNames {
        schema_id: &'a str,
        types: &'a [TableType],
    },
    TableId {
        schema_id: &'a str,
        table: &'a str,
        only_views: bool,
    },
    ViewDefinition {
        table_id: &'a str,
    },
    Columns {
        schema: &'a str,
        table: &'a str,
    },
    PrimaryKeys {
        schema: &'a str,
        table: &'a str,
    },
    ForeignKeys {
        schema: &'a str,
        table: &'a str,
        direction: KeyDirection,
    },
    Statistics {
        schema: &'a str,
        table: &'a str,
    },
}

impl CatalogQuery<'_> {
    /// Catalog table or procedure the query reads, for error context.
    pub fn source(&self) -> &'static str {
        match self {
            CatalogQuery::CurrentSchema => "CURRENT SCHEMA",
            CatalogQuery::SchemaId { .. } | CatalogQuery::SchemaNames { .. } => "SYS.SYSSCHEMAS",
            CatalogQuery::TableExists { .. } => "SYSVW.SYSTABLESVIEW",
            CatalogQuery::SequenceExists { .. } => "SYS.SYSSEQUENCES",
            CatalogQuery::TableNames { .. } | CatalogQuery::TableId { .. } => "SYS.SYSTABLES",
            CatalogQuery::ViewDefinition { .. } => "SYS.SYSVIEWS",
            CatalogQuery::Columns { .. } => "SYSIBM.SQLCOLUMNS",
            CatalogQuery::PrimaryKeys { .. } => "SYSIBM.SQLPRIMARYKEYS",
            CatalogQuery::ForeignKeys { .. } => "SYSIBM.SQLFOREIGNKEYS",
            CatalogQuery::Statistics { .. } => "SYSIBM.SQLSTATISTICS",
        }
    }

    /// Render the query text.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` if a name is empty, too long, or
    /// contains a null byte.
    pub fn to_sql(&self) -> Result<String> {
        let sql = match *self {
            CatalogQuery::CurrentSchema => "VALUES(CURRENT SCHEMA)".to_string(),

            CatalogQuery::SchemaId { schema } => format!(
                "SELECT SCHEMAID FROM SYS.SYSSCHEMAS WHERE SCHEMANAME = {}",
                literal(schema)?
            ),

            CatalogQuery::SchemaNames { exclude_prefix } => {
                // LIKE pattern: the prefix itself is a literal fragment
                let pattern = format!("{}%", exclude_prefix);
                format!(
                    "SELECT SCHEMANAME FROM SYS.SYSSCHEMAS WHERE SCHEMANAME NOT LIKE {} ORDER BY SCHEMANAME",
                    literal(&pattern)?
                )
            }

            CatalogQuery::TableExists { schema, table } => format!(
                "SELECT TABLENAME FROM SYSVW.SYSTABLESVIEW WHERE SCHEMANAME = {} AND TABLENAME = {}",
                literal(schema)?,
                literal(table)?
            ),

            CatalogQuery::SequenceExists {
                schema_id,
                sequence,
            } => format!(
                "SELECT SEQUENCENAME FROM SYS.SYSSEQUENCES WHERE SEQUENCESCHEMAID = {} AND SEQUENCENAME = {}",
                literal(schema_id)?,
                literal(sequence)?
            ),

            CatalogQuery::TableNames { schema_id, types } => {
                let kinds = types
                    .iter()
                    .map(|t| format!("TABLETYPE = '{}'", t.code()))
                    .collect::<Vec<_>>()
                    .join(" OR ");
                format!(
                    "SELECT TABLENAME FROM SYS.SYSTABLES WHERE ({}) AND SCHEMAID = {}",
                    kinds,
                    literal(schema_id)?
                )
            }

            CatalogQuery::TableId {
                schema_id,
                table,
                only_views,
            } => {
                let mut sql = format!(
                    "SELECT TABLEID FROM SYS.SYSTABLES WHERE TABLENAME = {} AND SCHEMAID = {}",
                    literal(table)?,
                    literal(schema_id)?
                );
                if only_views {
                    sql.push_str(" AND TABLETYPE = 'V'");
                }
                sql
            }

            CatalogQuery::ViewDefinition { table_id } => format!(
                "SELECT VIEWDEFINITION FROM SYS.SYSVIEWS WHERE TABLEID = {}",
                literal(table_id)?
            ),

            CatalogQuery::Columns { schema, table } => format!(
                "CALL SYSIBM.SQLCOLUMNS(null, {}, {}, null, 'DATATYPE=''ODBC''')",
                literal(schema)?,
                literal(table)?
            ),

            CatalogQuery::PrimaryKeys { schema, table } => format!(
                "CALL SYSIBM.SQLPRIMARYKEYS(null, {}, {}, null)",
                literal(schema)?,
                literal(table)?
            ),

            // The procedure names its mode from the other side of the key:
            // keys declared on a table are found with IMPORTEDKEY and the
            // table in the foreign-key slots.
            CatalogQuery::ForeignKeys {
                schema,
                table,
                direction: KeyDirection::Outgoing,
            } => format!(
                "CALL SYSIBM.SQLFOREIGNKEYS('', null, '', '', {}, {}, 'IMPORTEDKEY=1')",
                literal(schema)?,
                literal(table)?
            ),
            CatalogQuery::ForeignKeys {
                schema,
                table,
                direction: KeyDirection::Incoming,
            } => format!(
                "CALL SYSIBM.SQLFOREIGNKEYS('', {}, {}, '', null, '', 'EXPORTEDKEY=1')",
                literal(schema)?,
                literal(table)?
            ),

            CatalogQuery::Statistics { schema, table } => format!(
                "CALL SYSIBM.SQLSTATISTICS(null, {}, {}, 1, 1, null)",
                literal(schema)?,
                literal(table)?
            ),
        };
        Ok(sql)
    }
}

impl fmt::Display for CatalogQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_sql() {
            Ok(sql) => f.write_str(&sql),
            Err(_) => write!(f, "<invalid {} query>", self.source()),
        }
    }
}
