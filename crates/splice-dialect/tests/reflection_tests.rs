//! Reflection tests against a scripted catalog.
//!
//! These drive the public facade and inspector the way a reflection
//! framework would, and check the SQL that reaches the connection.

mod common;

use common::{foreign_key_rows, names, statistics_rows, users_catalog, FakeCatalog, FkRow};
use splice_dialect::{
    ColumnType, DriverImpl, ForeignKeyDescriptor, ForeignKeyOptions, IncomingForeignKeyDescriptor,
    IndexDescriptor, Inspector, NativeDriver, ReflectError, ReflectionConfig, SpliceDialect,
};

fn odbc_dialect() -> SpliceDialect {
    SpliceDialect::new(DriverImpl::default(), ReflectionConfig::default())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// =============================================================================
// Users / email addresses
// =============================================================================

#[tokio::test]
async fn test_primary_keys_of_users() {
    let dialect = odbc_dialect();
    let mut conn = users_catalog();

    let pk = dialect.get_primary_keys(&mut conn, "users", None).await.unwrap();
    assert_eq!(pk, ["user_id"]);

    let constraint = dialect.get_pk_constraint(&mut conn, "users", None).await.unwrap();
    assert_eq!(constraint.name.as_deref(), Some("sql_pk_users"));
    assert_eq!(constraint.table, "users");
}

#[tokio::test]
async fn test_foreign_key_of_email_addresses() {
    let dialect = odbc_dialect();
    let mut conn = users_catalog();

    let fks = dialect
        .get_foreign_keys(&mut conn, "email_addresses", None)
        .await
        .unwrap();

    assert_eq!(
        fks,
        vec![ForeignKeyDescriptor {
            name: "fk_addr_user".into(),
            constrained_columns: strings(&["user_id"]),
            referred_schema: None,
            referred_table: "users".into(),
            referred_columns: strings(&["user_id"]),
            options: ForeignKeyOptions::default(),
        }]
    );
}

#[tokio::test]
async fn test_table_without_foreign_keys() {
    let dialect = odbc_dialect();
    let mut conn = users_catalog();

    let fks = dialect.get_foreign_keys(&mut conn, "users", None).await.unwrap();
    assert!(fks.is_empty());
}

#[tokio::test]
async fn test_incoming_foreign_keys_of_users() {
    let dialect = odbc_dialect();
    let mut conn = users_catalog();

    let incoming = dialect
        .get_incoming_foreign_keys(&mut conn, "users", None)
        .await
        .unwrap();

    assert_eq!(
        incoming,
        vec![
            IncomingForeignKeyDescriptor {
                name: "fk_addr_user".into(),
                constrained_schema: None,
                constrained_table: "email_addresses".into(),
                constrained_columns: strings(&["user_id"]),
                referred_schema: None,
                referred_table: "users".into(),
                referred_columns: strings(&["user_id"]),
                options: ForeignKeyOptions::default(),
            },
            IncomingForeignKeyDescriptor {
                name: "fk_order_user".into(),
                constrained_schema: Some("app".into()),
                constrained_table: "orders".into(),
                constrained_columns: strings(&["customer_id"]),
                referred_schema: None,
                referred_table: "users".into(),
                referred_columns: strings(&["user_id"]),
                options: ForeignKeyOptions {
                    onupdate: Some("RESTRICT".into()),
                    ondelete: Some("CASCADE".into()),
                },
            },
        ]
    );
    assert_eq!(conn.count("EXPORTEDKEY=1"), 1);
}

// =============================================================================
// Default schema elision
// =============================================================================

#[tokio::test]
async fn test_referred_schema_elided_only_without_explicit_schema() {
    let dialect = odbc_dialect();
    let mut conn = users_catalog();

    let implicit = dialect
        .get_foreign_keys(&mut conn, "email_addresses", None)
        .await
        .unwrap();
    assert_eq!(implicit[0].referred_schema, None);

    let explicit = dialect
        .get_foreign_keys(&mut conn, "email_addresses", Some("splice"))
        .await
        .unwrap();
    assert_eq!(explicit[0].referred_schema.as_deref(), Some("splice"));
}

#[tokio::test]
async fn test_cross_schema_reference_keeps_schema() {
    let dialect = odbc_dialect();
    let mut conn = users_catalog();

    let fks = dialect
        .get_foreign_keys(&mut conn, "orders", Some("app"))
        .await
        .unwrap();
    assert_eq!(fks.len(), 1);
    assert_eq!(fks[0].referred_schema.as_deref(), Some("splice"));
    assert_eq!(fks[0].referred_table, "users");
    assert_eq!(fks[0].constrained_columns, ["customer_id"]);
    assert_eq!(fks[0].options.onupdate.as_deref(), Some("RESTRICT"));
    assert_eq!(fks[0].options.ondelete.as_deref(), Some("CASCADE"));
}

// =============================================================================
// Schema scoping
// =============================================================================

#[tokio::test]
async fn test_table_listing_never_leaks_other_schemas() {
    let dialect = odbc_dialect();
    let mut conn = users_catalog();

    let splice = dialect.get_table_names(&mut conn, None).await.unwrap();
    assert_eq!(splice, ["users", "email_addresses"]);

    let app = dialect.get_table_names(&mut conn, Some("app")).await.unwrap();
    assert_eq!(app, ["orders"]);

    let ghost = dialect.get_table_names(&mut conn, Some("ghost")).await.unwrap();
    assert!(ghost.is_empty());
}

#[tokio::test]
async fn test_schema_argument_is_upper_cased_for_the_catalog() {
    let dialect = odbc_dialect();
    let mut conn = users_catalog();

    let app = dialect.get_table_names(&mut conn, Some("App")).await.unwrap();
    assert_eq!(app, ["orders"]);
    assert_eq!(conn.count("SCHEMANAME = 'App'"), 0);
    assert_eq!(conn.count("SYSSCHEMAS WHERE SCHEMANAME = 'APP'"), 1);

    let columns = dialect.get_columns(&mut conn, "users", Some("Splice")).await.unwrap();
    let column_names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(column_names, ["user_id", "name"]);

    let pk = dialect.get_pk_constraint(&mut conn, "users", Some("splice")).await.unwrap();
    assert_eq!(pk.constrained_columns, strings(&["user_id"]));
}

#[tokio::test]
async fn test_schema_names_and_existence() {
    let dialect = odbc_dialect();
    let mut conn = users_catalog();

    assert_eq!(dialect.get_schema_names(&mut conn).await.unwrap(), ["app", "splice"]);
    assert!(dialect.has_table(&mut conn, "users", None).await.unwrap());
    assert!(!dialect.has_table(&mut conn, "orders", None).await.unwrap());
    assert!(!dialect.has_sequence(&mut conn, "users_seq", None).await.unwrap());
}

#[tokio::test]
async fn test_quotes_in_names_are_escaped() {
    let dialect = odbc_dialect();
    let mut conn = users_catalog();

    let found = dialect
        .has_table(&mut conn, "x' OR '1'='1", None)
        .await
        .unwrap();
    assert!(!found);
    assert_eq!(conn.count("TABLENAME = 'x'' OR ''1''=''1'"), 1);
}

// =============================================================================
// Idempotence
// =============================================================================

#[tokio::test]
async fn test_extractors_are_idempotent() {
    let dialect = odbc_dialect();
    let mut conn = users_catalog();

    let first = (
        dialect.get_table_names(&mut conn, None).await.unwrap(),
        dialect.get_columns(&mut conn, "users", None).await.unwrap(),
        dialect.get_pk_constraint(&mut conn, "users", None).await.unwrap(),
        dialect.get_foreign_keys(&mut conn, "email_addresses", None).await.unwrap(),
        dialect.get_incoming_foreign_keys(&mut conn, "users", None).await.unwrap(),
        dialect.get_indexes(&mut conn, "users", None).await.unwrap(),
    );
    let second = (
        dialect.get_table_names(&mut conn, None).await.unwrap(),
        dialect.get_columns(&mut conn, "users", None).await.unwrap(),
        dialect.get_pk_constraint(&mut conn, "users", None).await.unwrap(),
        dialect.get_foreign_keys(&mut conn, "email_addresses", None).await.unwrap(),
        dialect.get_incoming_foreign_keys(&mut conn, "users", None).await.unwrap(),
        dialect.get_indexes(&mut conn, "users", None).await.unwrap(),
    );

    assert_eq!(first, second);
    // The session schema is asked for once per dialect
    assert_eq!(conn.count("CURRENT SCHEMA"), 1);
}

// =============================================================================
// Merging
// =============================================================================

#[tokio::test]
async fn test_composite_foreign_key_columns_stay_paired() {
    fn row(pk_column: &'static str, fk_column: &'static str, name: &'static str) -> FkRow<'static> {
        FkRow {
            name,
            pk_schema: "SPLICE",
            pk_table: "PARENT",
            pk_column,
            fk_schema: "SPLICE",
            fk_table: "CHILD",
            fk_column,
            update_rule: None,
            delete_rule: None,
        }
    }

    let mut conn = FakeCatalog::new().on(
        "SQLFOREIGNKEYS",
        foreign_key_rows(&[
            row("X", "A", "FK1"),
            row("Y", "B", "FK1"),
            row("Z", "C", "FK1"),
            row("ID", "PARENT2_ID", "FK2"),
        ]),
    );
    let dialect = SpliceDialect::new(
        DriverImpl::Native(NativeDriver::new()),
        ReflectionConfig::default(),
    );

    let fks = dialect.get_foreign_keys(&mut conn, "child", None).await.unwrap();
    assert_eq!(fks.len(), 2);
    assert_eq!(fks[0].name, "fk1");
    assert_eq!(fks[0].constrained_columns, ["a", "b", "c"]);
    assert_eq!(fks[0].referred_columns, ["x", "y", "z"]);
    assert_eq!(fks[1].name, "fk2");
    assert_eq!(fks[1].constrained_columns, ["parent2_id"]);
}

#[tokio::test]
async fn test_indexes_merge_in_first_seen_order() {
    let mut conn = FakeCatalog::new().on(
        "SQLSTATISTICS",
        statistics_rows(&[("0", "IDX1", "A"), ("0", "IDX1", "B"), ("1", "IDX2", "C")]),
    );
    let dialect = SpliceDialect::new(
        DriverImpl::Native(NativeDriver::new()),
        ReflectionConfig::default(),
    );

    let indexes = dialect.get_indexes(&mut conn, "t", None).await.unwrap();
    assert_eq!(
        indexes,
        vec![
            IndexDescriptor {
                name: "IDX1".into(),
                unique: true,
                column_names: strings(&["A", "B"]),
            },
            IndexDescriptor {
                name: "IDX2".into(),
                unique: false,
                column_names: strings(&["C"]),
            },
        ]
    );
    assert_eq!(conn.count("CURRENT SCHEMA"), 0);
}

// =============================================================================
// Inspector
// =============================================================================

#[tokio::test]
async fn test_reflect_table_assembles_everything_once() {
    let dialect = odbc_dialect();
    let mut conn = users_catalog();

    {
        let mut inspector = Inspector::new(&dialect, &mut conn);
        let users = inspector.reflect_table("users", None).await.unwrap();

        assert_eq!(users.full_name(), "users");
        assert_eq!(users.columns.len(), 2);
        assert_eq!(users.column("user_id").map(|c| &c.column_type), Some(&ColumnType::Integer));
        assert!(!users.columns[0].nullable);
        assert_eq!(users.columns[1].column_type.to_string(), "VARCHAR(64)");
        assert!(users.is_pk_column("user_id"));
        assert!(users.foreign_keys.is_empty());
        assert_eq!(users.incoming_foreign_keys.len(), 2);
        assert_eq!(users.indexes.len(), 2);
        assert!(users.indexes[0].unique);
        // Index names keep catalog case while columns are normalized
        assert_eq!(users.indexes[0].name, "SQL_PK_USERS");
        assert_eq!(users.indexes[0].column_names, strings(&["USER_ID"]));
        assert_eq!(users.columns[0].name, "user_id");

        let again = inspector.reflect_table("users", None).await.unwrap();
        assert_eq!(users, again);
    }

    // Default schema, columns, primary key, both key directions, indexes
    assert_eq!(conn.executed.len(), 6);
}

#[tokio::test]
async fn test_inspector_names_schema_when_given() {
    let dialect = odbc_dialect();
    let mut conn = users_catalog();

    let mut inspector = Inspector::new(&dialect, &mut conn);
    let orders = inspector.reflect_table("orders", Some("app")).await.unwrap();
    assert_eq!(orders.full_name(), "app.orders");
    assert_eq!(orders.foreign_keys[0].referred_schema.as_deref(), Some("splice"));
    assert!(orders.columns.is_empty());
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_unavailable_catalog_surfaces_unmodified() {
    let dialect = odbc_dialect();
    let mut conn = users_catalog().unavailable("SQLCOLUMNS");

    let err = dialect.get_columns(&mut conn, "users", None).await.unwrap_err();
    assert!(matches!(err, ReflectError::CatalogUnavailable { .. }));
    assert_eq!(err.exit_code(), 2);
    // No retry
    assert_eq!(conn.count("SQLCOLUMNS"), 1);
}

#[tokio::test]
async fn test_missing_current_schema_is_an_error() {
    let dialect = odbc_dialect();
    let mut conn = FakeCatalog::new().on("CURRENT SCHEMA", names("1", &[]));

    let err = dialect.get_table_names(&mut conn, None).await.unwrap_err();
    assert_eq!(err.exit_code(), 2);
}
