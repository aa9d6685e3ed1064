//! Live database helpers for `db-tests`.

use gavel_api::{DbClient, DbConfig, StatementExecutor};
use gavel_core::schema;

/// Client for the database named by the `GAVEL_DB_*` variables.
pub fn test_client() -> DbClient {
    DbClient::from_config(&DbConfig::from_env()).expect("pool config should be valid")
}

/// Drop every table and recreate the full schema.
pub async fn fresh_schema(db: &DbClient) {
    db.execute_batch(&schema::create_all_script())
        .await
        .expect("schema should be recreated");
}
