//! Database Helper Functions
//!
//! The build-then-execute steps every route repeats: validate and build the
//! statement, run it through the executor, shape the result into an envelope.
//! A request that fails to build never reaches the executor.

use std::fmt;

use gavel_core::{
    schema, BoundStatement, Entity, Operation, ProjectionResponse, Report, SelectRequest,
    TabularResponse,
};

use crate::error::{ApiError, ApiResult};
use crate::executor::StatementExecutor;

fn build(op: &Operation) -> ApiResult<BoundStatement> {
    let stmt = op.build()?;
    tracing::debug!(
        kind = %op.kind(),
        sql = stmt.sql(),
        params = stmt.params().len(),
        "Statement built"
    );
    Ok(stmt)
}

/// Read every row of an entity, positional, with its column header.
pub async fn select_all(
    executor: &dyn StatementExecutor,
    entity: Entity,
) -> ApiResult<TabularResponse> {
    run_select(executor, Operation::Select(SelectRequest::all(entity))).await
}

/// Run a (possibly filtered) select.
pub async fn run_select(
    executor: &dyn StatementExecutor,
    op: Operation,
) -> ApiResult<TabularResponse> {
    let columns = match &op {
        Operation::Select(req) => req.entity.column_names(),
        _ => return Err(ApiError::internal_error("run_select expects a select")),
    };
    let stmt = build(&op)?;
    let rows = executor.query(&stmt).await?;
    Ok(TabularResponse::rows(rows).with_columns(columns))
}

/// Run an insert and report the affected row count.
pub async fn run_insert(
    executor: &dyn StatementExecutor,
    op: Operation,
) -> ApiResult<TabularResponse> {
    let stmt = build(&op)?;
    let affected = executor.execute(&stmt).await?;
    Ok(TabularResponse::affected(affected))
}

/// Run an update or delete by key. No matching row is a 404.
///
/// ```ignore
/// let op = delete_item(item_id);
/// run_keyed_mutation(executor, op, "Item", item_id).await?;
/// ```
pub async fn run_keyed_mutation(
    executor: &dyn StatementExecutor,
    op: Operation,
    entity_type: &str,
    key: impl fmt::Display,
) -> ApiResult<TabularResponse> {
    let stmt = build(&op)?;
    let affected = executor.execute(&stmt).await?;
    if affected == 0 {
        return Err(ApiError::entity_not_found(entity_type, key));
    }
    Ok(TabularResponse::affected(affected))
}

/// Run a projection, labelling cells with the names the caller asked for.
pub async fn run_projection(
    executor: &dyn StatementExecutor,
    op: Operation,
) -> ApiResult<ProjectionResponse> {
    let requested = match &op {
        Operation::Projection(req) => req.columns.clone(),
        _ => return Err(ApiError::internal_error("run_projection expects a projection")),
    };
    let stmt = build(&op)?;
    let rows = executor.query(&stmt).await?;
    Ok(ProjectionResponse::new(requested, rows))
}

/// Run a fixed report. An empty result is still a success.
pub async fn run_report(
    executor: &dyn StatementExecutor,
    report: Report,
) -> ApiResult<TabularResponse> {
    let stmt = build(&Operation::Report(report))?;
    let rows = executor.query(&stmt).await?;
    Ok(TabularResponse::rows(rows).with_columns(report.columns().iter().copied()))
}

/// Drop and recreate one table.
pub async fn reset_table(
    executor: &dyn StatementExecutor,
    entity: Entity,
) -> ApiResult<TabularResponse> {
    tracing::info!(table = entity.table(), "Resetting table");
    executor.execute_batch(&schema::reset_script(entity)).await?;
    Ok(TabularResponse::ok().with_message(format!("{} reset", entity.table())))
}
