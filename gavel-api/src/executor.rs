//! Statement Executor
//!
//! The contract request handlers run statements through. The production
//! implementation is [`DbClient`](crate::db::DbClient); tests substitute an
//! in-memory recorder.

use std::sync::Arc;

use async_trait::async_trait;
use gavel_core::{BoundStatement, Row};

use crate::error::ApiResult;

/// Runs bound statements on a pooled connection.
///
/// Every call acquires its own connection and releases it before returning,
/// on success and on error alike. Mutations commit immediately.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    /// Run a mutating statement and return the number of affected rows.
    async fn execute(&self, stmt: &BoundStatement) -> ApiResult<u64>;

    /// Run a read and return its rows, cells in select-list order.
    async fn query(&self, stmt: &BoundStatement) -> ApiResult<Vec<Row>>;

    /// Run a fixed administrative script (no parameters).
    async fn execute_batch(&self, script: &str) -> ApiResult<()>;

    /// Check that a connection can be acquired and used.
    async fn ping(&self) -> ApiResult<()>;
}

/// Executor shared across handlers.
pub type SharedExecutor = Arc<dyn StatementExecutor>;
