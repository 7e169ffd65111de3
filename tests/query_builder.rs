use std::sync::Arc;

use planetscale_dialect::clients::{Handle, InMemoryTestClient, InMemoryTestResponseBuilder};
use planetscale_dialect::error::DialectError;
use planetscale_dialect::traits::{Column, DatabaseIntrospector, ServerlessClient, Table};
use planetscale_dialect::types::{IntrospectorOptions, SqlValue, TransactionSettings};
use planetscale_dialect::{Database, PlanetScaleDialect, PlanetScaleDialectConfig, WhereClause};

// Test table and columns
struct Users;
struct UsersColumns {
    pub id: UsersId,
    pub name: UsersName,
}
struct UsersId;
struct UsersName;

impl Table for Users {
    type Columns = UsersColumns;
    fn table_name() -> &'static str {
        "users"
    }
    fn columns() -> Self::Columns {
        UsersColumns {
            id: UsersId,
            name: UsersName,
        }
    }
}

impl Column for UsersId {
    fn column_name(&self) -> &'static str {
        "id"
    }
    fn table_name(&self) -> &'static str {
        "users"
    }
}

impl Column for UsersName {
    fn column_name(&self) -> &'static str {
        "name"
    }
    fn table_name(&self) -> &'static str {
        "users"
    }
}

async fn database(client: &Arc<InMemoryTestClient>) -> Database<PlanetScaleDialect> {
    let dialect = PlanetScaleDialect::new(PlanetScaleDialectConfig::default())
        .with_client(Arc::clone(client) as Arc<dyn ServerlessClient>);
    Database::new(dialect).await.unwrap()
}

#[tokio::test]
async fn test_simple_select_single_column() {
    let in_memory_test_client = Arc::new(
        InMemoryTestClient::new().with_response(
            InMemoryTestResponseBuilder::new()
                .columns(&["id"])
                .row(vec![SqlValue::Int(1)])
                .build(),
        ),
    );
    let db = database(&in_memory_test_client).await;

    let result = db
        .querier()
        .select()
        .columns(&[&Users::columns().id])
        .from(Users)
        .execute()
        .await
        .unwrap();

    // Verify the query that was executed
    in_memory_test_client.assert_last_query("SELECT `users`.`id` FROM `users`", &[]);
    in_memory_test_client.assert_query_count(1);

    // Verify the result
    let row = result.single_row().unwrap();
    assert_eq!(row.get(&Users::columns().id).unwrap(), &SqlValue::Int(1));
}

#[tokio::test]
async fn test_select_with_where_and_limit() {
    let in_memory_test_client = Arc::new(
        InMemoryTestClient::new().with_response(
            InMemoryTestResponseBuilder::new()
                .columns(&["id"])
                .row(vec![SqlValue::Int(1)])
                .row(vec![SqlValue::Int(2)])
                .row(vec![SqlValue::Int(3)])
                .build(),
        ),
    );
    let db = database(&in_memory_test_client).await;

    let result = db
        .querier()
        .select()
        .columns(&[&Users::columns().id])
        .from(Users)
        .where_(WhereClause::eq(&Users::columns().name, "Test"))
        .limit(3)
        .execute()
        .await
        .unwrap();

    in_memory_test_client.assert_last_query(
        "SELECT `users`.`id` FROM `users` WHERE `users`.`name` = ? LIMIT 3",
        &[SqlValue::Text("Test".to_string())],
    );

    // Verify we got multiple rows
    let rows = result.rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].get(&Users::columns().id).unwrap(), &SqlValue::Int(3));
}

#[tokio::test]
async fn test_select_empty_result() {
    let in_memory_test_client = Arc::new(InMemoryTestClient::new().with_response(
        InMemoryTestResponseBuilder::new().columns(&["id"]).build(), // No rows
    ));
    let db = database(&in_memory_test_client).await;

    let result = db
        .querier()
        .select()
        .columns(&[&Users::columns().id])
        .from(Users)
        .where_(WhereClause::eq(&Users::columns().id, 999))
        .execute()
        .await
        .unwrap();

    assert!(result.is_empty());
    match result.single_row().unwrap_err() {
        DialectError::UnexpectedRowCount { expected, actual } => {
            assert_eq!(expected, 1);
            assert_eq!(actual, 0);
        }
        _ => panic!("Expected UnexpectedRowCount error"),
    }
}

#[tokio::test]
async fn test_compound_where_clause() {
    let in_memory_test_client = Arc::new(InMemoryTestClient::new());
    let db = database(&in_memory_test_client).await;

    db.querier()
        .select()
        .columns(&[&Users::columns().name])
        .from(Users)
        .where_(
            WhereClause::eq(&Users::columns().name, "Admin")
                .and(WhereClause::eq(&Users::columns().id, 1)),
        )
        .execute()
        .await
        .unwrap();

    in_memory_test_client.assert_last_query(
        "SELECT `users`.`name` FROM `users` WHERE (`users`.`name` = ?) AND (`users`.`id` = ?)",
        &[SqlValue::Text("Admin".to_string()), SqlValue::Int(1)],
    );
}

#[tokio::test]
async fn test_compiled_select_inside_transaction() {
    let in_memory_test_client = Arc::new(InMemoryTestClient::new());
    let db = database(&in_memory_test_client).await;
    let querier = db.querier();

    let query = querier
        .select()
        .columns(&[&Users::columns().id])
        .from(Users)
        .compile();

    let tx = querier
        .begin_transaction(TransactionSettings::default())
        .await
        .unwrap();
    tx.execute(&query).await.unwrap();
    tx.commit().await.unwrap();

    let queries = in_memory_test_client.recorded_queries();
    let statements: Vec<&str> = queries.iter().map(|q| q.sql.as_str()).collect();
    assert_eq!(
        statements,
        ["BEGIN", "SELECT `users`.`id` FROM `users`", "COMMIT"]
    );
    assert!(queries.iter().all(|q| q.handle == Handle::Connection(1)));
}

#[tokio::test]
async fn test_introspection_groups_columns() {
    let in_memory_test_client = Arc::new(
        InMemoryTestClient::new().with_response(
            InMemoryTestResponseBuilder::new()
                .columns(&[
                    "COLUMN_NAME",
                    "COLUMN_DEFAULT",
                    "TABLE_NAME",
                    "TABLE_SCHEMA",
                    "TABLE_TYPE",
                    "IS_NULLABLE",
                    "DATA_TYPE",
                    "EXTRA",
                    "COLUMN_COMMENT",
                ])
                .row(vec![
                    "id".into(),
                    SqlValue::Null,
                    "users".into(),
                    "app".into(),
                    "BASE TABLE".into(),
                    "NO".into(),
                    "bigint".into(),
                    "auto_increment".into(),
                    "".into(),
                ])
                .build(),
        ),
    );
    let db = database(&in_memory_test_client).await;

    let tables = db
        .introspection()
        .get_tables(&IntrospectorOptions::default())
        .await
        .unwrap();

    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].name, "users");
    assert!(tables[0].columns[0].is_auto_incrementing);

    let last = in_memory_test_client.last_query().unwrap();
    assert!(last.sql.contains("information_schema.COLUMNS"));
    assert!(last.sql.contains("not in (?, ?)"));
    assert_eq!(
        last.params,
        vec![
            SqlValue::from("schema_migration"),
            SqlValue::from("schema_migration_lock")
        ]
    );
}
