//! Named-field adapters over positional catalog rows.
//!
//! The `SYSIBM` procedures return fixed column positions that are not
//! self-describing. Each layout here owns the position-to-field mapping for
//! one procedure, so driver version skew is fixed in one place. A row that
//! is narrower than its layout is reported as a malformed row rather than
//! read past its end.

use crate::core::value::{Row, RowSet};
use crate::error::{ReflectError, Result};

/// Check a row is wide enough for `width` positions.
fn ensure_width(row: &Row, width: usize, procedure: &str) -> Result<()> {
    if row.len() < width {
        return Err(ReflectError::malformed(
            procedure,
            format!("expected at least {} columns, got {}", width, row.len()),
        ));
    }
    Ok(())
}

/// Read a position that must not be NULL.
fn required<'r>(row: &'r Row, idx: usize, field: &str, procedure: &str) -> Result<&'r str> {
    row.get(idx).ok_or_else(|| {
        ReflectError::malformed(procedure, format!("{} (position {}) is null", field, idx))
    })
}

fn is_yes(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("YES"))
}

// =============================================================================
// SYSIBM.SQLCOLUMNS
// =============================================================================

/// Where the nullability flag lives in a `SQLCOLUMNS` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullableField {
    /// `IS_NULLABLE` text, "YES" when nullable.
    Text(usize),
    /// `NULLABLE` code, 1 when nullable.
    Code(usize),
}

impl NullableField {
    fn position(&self) -> usize {
        match self {
            NullableField::Text(idx) | NullableField::Code(idx) => *idx,
        }
    }

    fn read(&self, row: &Row) -> bool {
        match self {
            NullableField::Text(idx) => is_yes(row.get(*idx)),
            NullableField::Code(idx) => row.get(*idx).is_some_and(|v| v.trim() == "1"),
        }
    }
}

/// Positions of the `SQLCOLUMNS` fields a column descriptor needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnsLayout {
    pub name: usize,
    pub type_name: usize,
    pub size: usize,
    pub digits: usize,
    pub default: usize,
    pub nullable: NullableField,
    pub autoincrement: usize,
}

impl ColumnsLayout {
    pub const PROCEDURE: &'static str = "SYSIBM.SQLCOLUMNS";

    /// ODBC driver: nullability from `IS_NULLABLE`.
    pub const ODBC: ColumnsLayout = ColumnsLayout {
        name: 3,
        type_name: 5,
        size: 6,
        digits: 8,
        default: 12,
        nullable: NullableField::Text(17),
        autoincrement: 22,
    };

    /// Native wire driver: nullability from the `NULLABLE` code.
    pub const NATIVE: ColumnsLayout = ColumnsLayout {
        nullable: NullableField::Code(10),
        ..Self::ODBC
    };

    fn width(&self) -> usize {
        [
            self.name,
            self.type_name,
            self.size,
            self.digits,
            self.default,
            self.nullable.position(),
            self.autoincrement,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }

    pub fn read<'r>(&self, row: &'r Row) -> Result<ColumnRow<'r>> {
        ensure_width(row, self.width(), Self::PROCEDURE)?;
        Ok(ColumnRow {
            name: required(row, self.name, "COLUMN_NAME", Self::PROCEDURE)?,
            type_name: required(row, self.type_name, "TYPE_NAME", Self::PROCEDURE)?,
            size: row.get(self.size),
            digits: row.get(self.digits),
            default: row.get(self.default).filter(|d| !d.is_empty()),
            nullable: self.nullable.read(row),
            autoincrement: is_yes(row.get(self.autoincrement)),
        })
    }
}

/// One `SQLCOLUMNS` row by field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRow<'r> {
    pub name: &'r str,
    pub type_name: &'r str,
    pub size: Option<&'r str>,
    pub digits: Option<&'r str>,
    pub default: Option<&'r str>,
    pub nullable: bool,
    pub autoincrement: bool,
}

// =============================================================================
// SYSIBM.SQLPRIMARYKEYS
// =============================================================================

/// Positions of the `SQLPRIMARYKEYS` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryKeyLayout {
    pub column: usize,
    pub key_seq: usize,
    pub name: usize,
}

impl PrimaryKeyLayout {
    pub const PROCEDURE: &'static str = "SYSIBM.SQLPRIMARYKEYS";

    pub const SYSIBM: PrimaryKeyLayout = PrimaryKeyLayout {
        column: 3,
        key_seq: 4,
        name: 5,
    };

    pub fn read<'r>(&self, row: &'r Row) -> Result<PrimaryKeyRow<'r>> {
        let width = self.column.max(self.key_seq).max(self.name) + 1;
        ensure_width(row, width, Self::PROCEDURE)?;
        Ok(PrimaryKeyRow {
            column: required(row, self.column, "COLUMN_NAME", Self::PROCEDURE)?,
            key_seq: row.get(self.key_seq),
            name: row.get(self.name),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryKeyRow<'r> {
    pub column: &'r str,
    pub key_seq: Option<&'r str>,
    pub name: Option<&'r str>,
}

// =============================================================================
// SYSIBM.SQLFOREIGNKEYS
// =============================================================================

/// Positions of the `SQLFOREIGNKEYS` fields.
///
/// "Referred" is the primary-key side, "constrained" the foreign-key side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyLayout {
    pub referred_schema: usize,
    pub referred_table: usize,
    pub referred_column: usize,
    pub constrained_schema: usize,
    pub constrained_table: usize,
    pub constrained_column: usize,
    pub update_rule: usize,
    pub delete_rule: usize,
    pub name: usize,
}

impl ForeignKeyLayout {
    pub const PROCEDURE: &'static str = "SYSIBM.SQLFOREIGNKEYS";

    pub const SYSIBM: ForeignKeyLayout = ForeignKeyLayout {
        referred_schema: 1,
        referred_table: 2,
        referred_column: 3,
        constrained_schema: 5,
        constrained_table: 6,
        constrained_column: 7,
        update_rule: 9,
        delete_rule: 10,
        name: 12,
    };

    fn width(&self) -> usize {
        [
            self.referred_schema,
            self.referred_table,
            self.referred_column,
            self.constrained_schema,
            self.constrained_table,
            self.constrained_column,
            self.update_rule,
            self.delete_rule,
            self.name,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }

    pub fn read<'r>(&self, row: &'r Row) -> Result<ForeignKeyRow<'r>> {
        ensure_width(row, self.width(), Self::PROCEDURE)?;
        let p = Self::PROCEDURE;
        Ok(ForeignKeyRow {
            name: required(row, self.name, "FK_NAME", p)?,
            referred_schema: row.get(self.referred_schema),
            referred_table: required(row, self.referred_table, "PKTABLE_NAME", p)?,
            referred_column: required(row, self.referred_column, "PKCOLUMN_NAME", p)?,
            constrained_schema: row.get(self.constrained_schema),
            constrained_table: required(row, self.constrained_table, "FKTABLE_NAME", p)?,
            constrained_column: required(row, self.constrained_column, "FKCOLUMN_NAME", p)?,
            update_rule: referential_action(row.get(self.update_rule)),
            delete_rule: referential_action(row.get(self.delete_rule)),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKeyRow<'r> {
    pub name: &'r str,
    pub referred_schema: Option<&'r str>,
    pub referred_table: &'r str,
    pub referred_column: &'r str,
    pub constrained_schema: Option<&'r str>,
    pub constrained_table: &'r str,
    pub constrained_column: &'r str,
    pub update_rule: Option<&'static str>,
    pub delete_rule: Option<&'static str>,
}

/// Map an ODBC referential-action code to its SQL text.
///
/// NO ACTION (3) is the default and maps to `None`, as do unknown codes.
pub fn referential_action(code: Option<&str>) -> Option<&'static str> {
    match code.map(str::trim) {
        Some("0") => Some("CASCADE"),
        Some("1") => Some("RESTRICT"),
        Some("2") => Some("SET NULL"),
        Some("4") => Some("SET DEFAULT"),
        _ => None,
    }
}

// =============================================================================
// SYSIBM.SQLSTATISTICS
// =============================================================================

/// Header names of the `SQLSTATISTICS` fields.
///
/// Statistics rows are read by name: the procedure's header is stable
/// across drivers while its width is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsLayout {
    pub index_name: &'static str,
    pub non_unique: &'static str,
    pub column_name: &'static str,
}

impl StatisticsLayout {
    pub const PROCEDURE: &'static str = "SYSIBM.SQLSTATISTICS";

    pub const SYSIBM: StatisticsLayout = StatisticsLayout {
        index_name: "INDEX_NAME",
        non_unique: "NON_UNIQUE",
        column_name: "COLUMN_NAME",
    };

    /// Resolve header names to positions for one result set.
    pub fn bind(&self, result: &RowSet) -> Result<BoundStatistics> {
        let find = |name: &str| {
            result.column_index(name).ok_or_else(|| {
                ReflectError::malformed(
                    Self::PROCEDURE,
                    format!("result has no {} column", name),
                )
            })
        };
        Ok(BoundStatistics {
            index_name: find(self.index_name)?,
            non_unique: find(self.non_unique)?,
            column_name: find(self.column_name)?,
        })
    }
}

/// A [`StatisticsLayout`] resolved against one header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundStatistics {
    index_name: usize,
    non_unique: usize,
    column_name: usize,
}

impl BoundStatistics {
    /// Read one row. Returns `None` for table-statistic rows, which carry
    /// no index name.
    pub fn read<'r>(&self, row: &'r Row) -> Result<Option<StatisticsRow<'r>>> {
        let Some(index_name) = row.get(self.index_name) else {
            return Ok(None);
        };
        let column = required(
            row,
            self.column_name,
            "COLUMN_NAME",
            StatisticsLayout::PROCEDURE,
        )?;
        let non_unique = match row.get(self.non_unique).map(|v| v.trim().to_ascii_lowercase()) {
            None => false,
            Some(flag) => match flag.as_str() {
                "1" | "true" | "t" | "yes" | "y" => true,
                "0" | "false" | "f" | "no" | "n" => false,
                other => {
                    return Err(ReflectError::malformed(
                        StatisticsLayout::PROCEDURE,
                        format!("NON_UNIQUE value {:?} is not a flag", other),
                    ))
                }
            },
        };
        Ok(Some(StatisticsRow {
            index_name,
            non_unique,
            column,
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsRow<'r> {
    pub index_name: &'r str,
    pub non_unique: bool,
    pub column: &'r str,
}
