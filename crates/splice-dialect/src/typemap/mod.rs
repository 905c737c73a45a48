//! Catalog type names and the column types they resolve to.
//!
//! `SYSIBM.SQLCOLUMNS` reports a type name plus size and digit columns.
//! Decimal types take precision and scale, character types take a length,
//! and everything else maps through a fixed name table. Unknown names
//! resolve to [`ColumnType::Null`] with a warning.

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::warn;

use crate::error::{ReflectError, Result};

/// Semantic column type of a reflected column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Blob,
    Char(Option<u32>),
    Clob,
    Date,
    DateTime,
    Integer,
    SmallInt,
    BigInt,
    Decimal {
        precision: Option<u32>,
        scale: Option<u32>,
    },
    Numeric {
        precision: Option<u32>,
        scale: Option<u32>,
    },
    Real,
    Float,
    Time,
    Timestamp,
    Varchar(Option<u32>),
    LongVarchar,
    Text,
    /// Placeholder for a type name the table does not know.
    Null,
}

impl ColumnType {
    /// Bare type name without parameters.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Blob => "BLOB",
            ColumnType::Char(_) => "CHAR",
            ColumnType::Clob => "CLOB",
            ColumnType::Date => "DATE",
            ColumnType::DateTime => "DATETIME",
            ColumnType::Integer => "INTEGER",
            ColumnType::SmallInt => "SMALLINT",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Decimal { .. } => "DECIMAL",
            ColumnType::Numeric { .. } => "NUMERIC",
            ColumnType::Real => "REAL",
            ColumnType::Float => "FLOAT",
            ColumnType::Time => "TIME",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Varchar(_) => "VARCHAR",
            ColumnType::LongVarchar => "LONGVARCHAR",
            ColumnType::Text => "TEXT",
            ColumnType::Null => "NULL",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ColumnType::Null)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Char(Some(len)) | ColumnType::Varchar(Some(len)) => {
                write!(f, "{}({})", self.name(), len)
            }
            ColumnType::Decimal {
                precision: Some(p),
                scale,
            }
            | ColumnType::Numeric {
                precision: Some(p),
                scale,
            } => match scale {
                Some(s) => write!(f, "{}({},{})", self.name(), p, s),
                None => write!(f, "{}({})", self.name(), p),
            },
            _ => f.write_str(self.name()),
        }
    }
}

impl Serialize for ColumnType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Look up the unparameterized column type for a catalog type name.
pub fn lookup_type(type_name: &str) -> Option<ColumnType> {
    let ty = match type_name {
        "BLOB" => ColumnType::Blob,
        "CHAR" | "CHARACTER" => ColumnType::Char(None),
        "CLOB" => ColumnType::Clob,
        "DATE" => ColumnType::Date,
        "DATETIME" => ColumnType::DateTime,
        "INTEGER" => ColumnType::Integer,
        "SMALLINT" | "TINYINT" => ColumnType::SmallInt,
        "BIGINT" => ColumnType::BigInt,
        "DECIMAL" => ColumnType::Decimal {
            precision: None,
            scale: None,
        },
        "NUMERIC" => ColumnType::Numeric {
            precision: None,
            scale: None,
        },
        "REAL" => ColumnType::Real,
        "DOUBLE" | "FLOAT" => ColumnType::Float,
        "TIME" => ColumnType::Time,
        "TIMESTAMP" => ColumnType::Timestamp,
        "VARCHAR" => ColumnType::Varchar(None),
        "LONGVARCHAR" | "LONG VARCHAR" => ColumnType::LongVarchar,
        "TEXT" => ColumnType::Text,
        _ => return None,
    };
    Some(ty)
}

/// Raw type fields of one `SQLCOLUMNS` row.
#[derive(Debug, Clone, Copy)]
pub struct TypeFields<'a> {
    pub column: &'a str,
    pub type_name: &'a str,
    pub size: Option<&'a str>,
    pub digits: Option<&'a str>,
}

/// Resolve a column's type from its catalog type name and size fields.
///
/// An unparsable size or digit value is a malformed row. An unknown type
/// name is not an error.
pub fn resolve_column_type(fields: TypeFields<'_>) -> Result<ColumnType> {
    let type_name = fields.type_name.trim().to_uppercase();

    let int_field = |value: Option<&str>, what: &str| -> Result<Option<u32>> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(None),
            Some(text) => text.parse::<u32>().map(Some).map_err(|_| {
                ReflectError::malformed(
                    "SYSIBM.SQLCOLUMNS",
                    format!(
                        "column {}: {} {:?} is not an integer",
                        fields.column, what, text
                    ),
                )
            }),
        }
    };

    match type_name.as_str() {
        "DECIMAL" | "NUMERIC" => {
            let precision = int_field(fields.size, "precision")?;
            let scale = int_field(fields.digits, "scale")?;
            Ok(if type_name == "DECIMAL" {
                ColumnType::Decimal { precision, scale }
            } else {
                ColumnType::Numeric { precision, scale }
            })
        }
        "CHAR" | "CHARACTER" => Ok(ColumnType::Char(int_field(fields.size, "length")?)),
        "VARCHAR" => Ok(ColumnType::Varchar(int_field(fields.size, "length")?)),
        other => match lookup_type(other) {
            Some(ty) => Ok(ty),
            None => {
                warn!(
                    "Did not recognize type '{}' of column '{}'",
                    fields.type_name, fields.column
                );
                Ok(ColumnType::Null)
            }
        },
    }
}
