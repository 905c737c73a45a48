//! Shared fixtures for reflection tests.

#![allow(dead_code)]

use async_trait::async_trait;
use splice_dialect::{Connection, ReflectError, Result, RowSet};

/// A catalog stand-in. Each query is answered with the first registered
/// result whose SQL fragment it contains, or an empty result.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    responses: Vec<(String, RowSet)>,
    unavailable: Vec<String>,
    pub executed: Vec<String>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, fragment: &str, result: RowSet) -> Self {
        self.responses.push((fragment.to_string(), result));
        self
    }

    pub fn unavailable(mut self, fragment: &str) -> Self {
        self.unavailable.push(fragment.to_string());
        self
    }

    /// Statements containing `fragment`.
    pub fn count(&self, fragment: &str) -> usize {
        self.executed.iter().filter(|sql| sql.contains(fragment)).count()
    }
}

#[async_trait]
impl Connection for FakeCatalog {
    async fn execute(&mut self, sql: &str) -> Result<RowSet> {
        self.executed.push(sql.to_string());
        if self.unavailable.iter().any(|f| sql.contains(f.as_str())) {
            return Err(ReflectError::catalog(sql, "connection reset"));
        }
        Ok(self
            .responses
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map(|(_, result)| result.clone())
            .unwrap_or_default())
    }
}

/// One-column result.
pub fn names(header: &str, values: &[&str]) -> RowSet {
    RowSet::from_text(&[header], values.iter().map(|v| vec![Some(*v)]).collect())
}

/// `SQLPRIMARYKEYS` rows: (schema, table, column, key_seq, pk_name).
pub fn primary_key_rows(rows: &[(&str, &str, &str, &str, &str)]) -> RowSet {
    RowSet::from_text(
        &["TABLE_CAT", "TABLE_SCHEM", "TABLE_NAME", "COLUMN_NAME", "KEY_SEQ", "PK_NAME"],
        rows.iter()
            .map(|(schema, table, column, seq, name)| {
                vec![None, Some(*schema), Some(*table), Some(*column), Some(*seq), Some(*name)]
            })
            .collect(),
    )
}

/// `SQLCOLUMNS` rows in the ODBC layout: (name, type, size, digits, nullable).
pub fn column_rows(rows: &[(&str, &str, Option<&str>, Option<&str>, bool)]) -> RowSet {
    let rows = rows
        .iter()
        .map(|(name, type_name, size, digits, nullable)| {
            let mut row: Vec<Option<&str>> = vec![None; 24];
            row[1] = Some("SPLICE");
            row[3] = Some(*name);
            row[5] = Some(*type_name);
            row[6] = *size;
            row[8] = *digits;
            row[10] = Some(if *nullable { "1" } else { "0" });
            row[17] = Some(if *nullable { "YES" } else { "NO" });
            row[22] = Some("NO");
            row
        })
        .collect();
    RowSet::from_text(&[], rows)
}

/// One foreign key column pair.
#[derive(Debug, Clone, Copy)]
pub struct FkRow<'a> {
    pub name: &'a str,
    pub pk_schema: &'a str,
    pub pk_table: &'a str,
    pub pk_column: &'a str,
    pub fk_schema: &'a str,
    pub fk_table: &'a str,
    pub fk_column: &'a str,
    pub update_rule: Option<&'a str>,
    pub delete_rule: Option<&'a str>,
}

/// `SQLFOREIGNKEYS` rows in the procedure's positional layout.
pub fn foreign_key_rows(rows: &[FkRow<'_>]) -> RowSet {
    RowSet::from_text(
        &[
            "PKTABLE_CAT",
            "PKTABLE_SCHEM",
            "PKTABLE_NAME",
            "PKCOLUMN_NAME",
            "FKTABLE_CAT",
            "FKTABLE_SCHEM",
            "FKTABLE_NAME",
            "FKCOLUMN_NAME",
            "KEY_SEQ",
            "UPDATE_RULE",
            "DELETE_RULE",
            "PK_NAME",
            "FK_NAME",
            "DEFERRABILITY",
        ],
        rows.iter()
            .enumerate()
            .map(|(i, r)| {
                let seq: &'static str = ["1", "2", "3", "4", "5"][i % 5];
                vec![
                    None,
                    Some(r.pk_schema),
                    Some(r.pk_table),
                    Some(r.pk_column),
                    None,
                    Some(r.fk_schema),
                    Some(r.fk_table),
                    Some(r.fk_column),
                    Some(seq),
                    r.update_rule,
                    r.delete_rule,
                    None,
                    Some(r.name),
                    Some("7"),
                ]
            })
            .collect(),
    )
}

/// `SQLSTATISTICS` rows: (non_unique, index_name, column_name).
pub fn statistics_rows(rows: &[(&str, &str, &str)]) -> RowSet {
    RowSet::from_text(
        &[
            "TABLE_CAT",
            "TABLE_SCHEM",
            "TABLE_NAME",
            "NON_UNIQUE",
            "INDEX_QUALIFIER",
            "INDEX_NAME",
            "TYPE",
            "ORDINAL_POSITION",
            "COLUMN_NAME",
            "ASC_OR_DESC",
        ],
        rows.iter()
            .map(|(non_unique, index, column)| {
                vec![
                    None,
                    Some("SPLICE"),
                    Some("T"),
                    Some(*non_unique),
                    None,
                    Some(*index),
                    Some("3"),
                    Some("1"),
                    Some(*column),
                    Some("A"),
                ]
            })
            .collect(),
    )
}

/// The `USERS` / `EMAIL_ADDRESSES` catalog in schema `SPLICE`, with an
/// `ORDERS` table in schema `APP` that references `SPLICE.USERS`.
pub fn users_catalog() -> FakeCatalog {
    let addr_user = FkRow {
        name: "FK_ADDR_USER",
        pk_schema: "SPLICE",
        pk_table: "USERS",
        pk_column: "USER_ID",
        fk_schema: "SPLICE",
        fk_table: "EMAIL_ADDRESSES",
        fk_column: "USER_ID",
        update_rule: None,
        delete_rule: None,
    };
    let order_user = FkRow {
        name: "FK_ORDER_USER",
        pk_schema: "SPLICE",
        pk_table: "USERS",
        pk_column: "USER_ID",
        fk_schema: "APP",
        fk_table: "ORDERS",
        fk_column: "CUSTOMER_ID",
        update_rule: Some("1"),
        delete_rule: Some("0"),
    };

    FakeCatalog::new()
        .on("VALUES(CURRENT SCHEMA)", names("1", &["SPLICE"]))
        .on("SYSSCHEMAS WHERE SCHEMANAME = 'SPLICE'", names("SCHEMAID", &["id-splice"]))
        .on("SYSSCHEMAS WHERE SCHEMANAME = 'APP'", names("SCHEMAID", &["id-app"]))
        .on(
            "SCHEMANAME = 'SPLICE' AND TABLENAME = 'USERS'",
            names("TABLENAME", &["USERS"]),
        )
        .on(
            "NOT LIKE 'SYS%'",
            names("SCHEMANAME", &["APP", "SPLICE"]),
        )
        .on(
            "(TABLETYPE = 'T' OR TABLETYPE = 'E') AND SCHEMAID = 'id-splice'",
            names("TABLENAME", &["USERS", "EMAIL_ADDRESSES"]),
        )
        .on(
            "(TABLETYPE = 'T' OR TABLETYPE = 'E') AND SCHEMAID = 'id-app'",
            names("TABLENAME", &["ORDERS"]),
        )
        .on(
            "SQLPRIMARYKEYS(null, 'SPLICE', 'USERS'",
            primary_key_rows(&[("SPLICE", "USERS", "USER_ID", "1", "SQL_PK_USERS")]),
        )
        .on(
            "'SPLICE', 'EMAIL_ADDRESSES', 'IMPORTEDKEY=1'",
            foreign_key_rows(&[addr_user]),
        )
        .on(
            "'APP', 'ORDERS', 'IMPORTEDKEY=1'",
            foreign_key_rows(&[order_user]),
        )
        .on(
            "'SPLICE', 'USERS', '', null, '', 'EXPORTEDKEY=1'",
            foreign_key_rows(&[addr_user, order_user]),
        )
        .on(
            "SQLCOLUMNS(null, 'SPLICE', 'USERS'",
            column_rows(&[
                ("USER_ID", "INTEGER", Some("10"), Some("0"), false),
                ("NAME", "VARCHAR", Some("64"), None, true),
            ]),
        )
        .on(
            "SQLSTATISTICS(null, 'SPLICE', 'USERS'",
            statistics_rows(&[("0", "SQL_PK_USERS", "USER_ID"), ("1", "IDX_USERS_NAME", "NAME")]),
        )
}
