//! In-memory executor that records every statement it is handed.

use std::sync::Mutex;

use async_trait::async_trait;
use gavel_api::{ApiResult, StatementExecutor};
use gavel_core::{BoundStatement, Row};

/// One call made against the executor.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Execute(BoundStatement),
    Query(BoundStatement),
    Batch(String),
    Ping,
}

/// Returns scripted results and records calls in order.
pub struct RecordingExecutor {
    calls: Mutex<Vec<Call>>,
    rows: ApiResult<Vec<Row>>,
    affected: ApiResult<u64>,
    ping: ApiResult<()>,
}

impl Default for RecordingExecutor {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            rows: Ok(Vec::new()),
            affected: Ok(1),
            ping: Ok(()),
        }
    }
}

#[allow(dead_code)]
impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = Ok(rows);
        self
    }

    pub fn with_affected(mut self, affected: u64) -> Self {
        self.affected = Ok(affected);
        self
    }

    pub fn failing_execute(mut self, err: gavel_api::ApiError) -> Self {
        self.affected = Err(err);
        self
    }

    pub fn failing_ping(mut self, err: gavel_api::ApiError) -> Self {
        self.ping = Err(err);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// The single statement run so far, if exactly one was.
    pub fn only_statement(&self) -> Option<BoundStatement> {
        match self.calls().as_slice() {
            [Call::Execute(stmt)] | [Call::Query(stmt)] => Some(stmt.clone()),
            _ => None,
        }
    }

    fn record(&self, call: Call) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl StatementExecutor for RecordingExecutor {
    async fn execute(&self, stmt: &BoundStatement) -> ApiResult<u64> {
        self.record(Call::Execute(stmt.clone()));
        self.affected.clone()
    }

    async fn query(&self, stmt: &BoundStatement) -> ApiResult<Vec<Row>> {
        self.record(Call::Query(stmt.clone()));
        self.rows.clone()
    }

    async fn execute_batch(&self, script: &str) -> ApiResult<()> {
        self.record(Call::Batch(script.to_string()));
        Ok(())
    }

    async fn ping(&self) -> ApiResult<()> {
        self.record(Call::Ping);
        self.ping.clone()
    }
}
