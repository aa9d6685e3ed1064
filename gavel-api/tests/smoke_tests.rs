//! Database-backed smoke tests.
//!
//! Run with `--features db-tests` against a disposable PostgreSQL database;
//! every run drops and recreates the whole schema.

#![cfg(feature = "db-tests")]

mod support;

use gavel_api::{db_helpers, DbClient, ErrorCode, StatementExecutor};
use gavel_core::{BindValue, Entity, Operation, Report, SelectRequest};
use gavel_test_utils::fixtures;

use support::db::{fresh_schema, test_client};

async fn insert_then_select_round_trips(db: &DbClient) {
    let customer = fixtures::customer_insert();
    let item = fixtures::item_insert(1);
    let expected: Vec<_> = item.values.iter().map(|v| v.to_cell()).collect();

    db_helpers::run_insert(db, Operation::Insert(customer)).await.expect("customer insert");
    let inserted = db_helpers::run_insert(db, Operation::Insert(item)).await.expect("item insert");
    assert_eq!(inserted.rows_affected, Some(1));

    let stmt = Operation::Select(SelectRequest::all(Entity::Item)).build().expect("select builds");
    let rows = db.query(&stmt).await.expect("select runs");
    assert_eq!(rows, vec![expected]);
}

async fn foreign_key_violation_keeps_sqlstate(db: &DbClient) {
    let mut orphan = fixtures::item_insert(2);
    orphan.values[3] = BindValue::BigInt(5555);

    let err = db_helpers::run_insert(db, Operation::Insert(orphan))
        .await
        .expect_err("insert should violate the customer foreign key");
    assert_eq!(err.code, ErrorCode::ForeignKeyViolation);
    assert_eq!(err.err.as_deref(), Some("23503"));
}

async fn missing_rows_are_not_found(db: &DbClient) {
    let err = db_helpers::run_keyed_mutation(db, gavel_api::delete_item(999), "Item", 999)
        .await
        .expect_err("nothing to delete");
    assert_eq!(err.code, ErrorCode::EntityNotFound);
}

async fn empty_report_is_empty(db: &DbClient) {
    let response = db_helpers::run_report(db, Report::MaxBid { item_id: 1 })
        .await
        .expect("report runs");
    assert!(response.success);
    assert_eq!(response.data, Some(Vec::new()));
}

#[tokio::test]
async fn database_smoke() {
    let db = test_client();
    db.ping().await.expect("database should be reachable");
    fresh_schema(&db).await;

    insert_then_select_round_trips(&db).await;
    foreign_key_violation_keeps_sqlstate(&db).await;
    missing_rows_are_not_found(&db).await;
    empty_report_is_empty(&db).await;

    db.close();
}
