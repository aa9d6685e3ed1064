//! Query Builder
//!
//! Turns a typed [`Operation`] into a [`BoundStatement`]: statement text with
//! positional placeholders (`$1..$n`) plus the ordered bind values.
//!
//! The statement text is assembled only from:
//! - fixed keywords,
//! - catalogued identifiers resolved through [`Entity::resolve`],
//! - operator and connective spellings from [`Comparison`] / [`Connective`],
//! - placeholders.
//!
//! Caller-supplied scalars are always pushed as bind values, so two requests
//! that differ only in their values produce the same statement text.

use std::collections::HashSet;
use std::fmt;

use postgres_types::ToSql;

use crate::entity::{Column, Entity};
use crate::error::{ValidationError, ValidationResult};
use crate::filter::{Comparison, Filter};
use crate::report::Report;
use crate::value::BindValue;

// ============================================================================
// BOUND STATEMENT
// ============================================================================

/// Statement text plus its ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundStatement {
    sql: String,
    params: Vec<BindValue>,
}

impl BoundStatement {
    pub fn new(sql: impl Into<String>, params: Vec<BindValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[BindValue] {
        &self.params
    }

    /// Parameters in the form the driver expects.
    pub fn param_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_to_sql()).collect()
    }
}

/// Accumulates statement text and numbers placeholders as values are bound.
struct StatementWriter {
    sql: String,
    params: Vec<BindValue>,
}

impl StatementWriter {
    fn new(head: impl Into<String>) -> Self {
        Self {
            sql: head.into(),
            params: Vec::new(),
        }
    }

    fn push(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    /// Record `value` and return its placeholder.
    fn bind(&mut self, value: BindValue) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    fn finish(self) -> BoundStatement {
        BoundStatement {
            sql: self.sql,
            params: self.params,
        }
    }
}

// ============================================================================
// OPERATION REQUESTS
// ============================================================================

/// A named value aimed at one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub column: String,
    pub value: BindValue,
}

impl Field {
    pub fn new(column: impl Into<String>, value: impl Into<BindValue>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// Insert one row; `values` follow the entity's fixed column order.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertRequest {
    pub entity: Entity,
    pub values: Vec<BindValue>,
}

/// Update the row identified by `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub entity: Entity,
    pub set: Vec<Field>,
    pub key: Vec<Field>,
}

/// Delete the row identified by `key`.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRequest {
    pub entity: Entity,
    pub key: Vec<Field>,
}

/// Select every column of an entity, optionally filtered.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectRequest {
    pub entity: Entity,
    pub filter: Filter,
}

impl SelectRequest {
    pub fn all(entity: Entity) -> Self {
        Self {
            entity,
            filter: Filter::new(),
        }
    }

    pub fn filtered(entity: Entity, filter: Filter) -> Self {
        Self { entity, filter }
    }
}

/// Select caller-chosen columns of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRequest {
    pub entity: Entity,
    pub columns: Vec<String>,
}

/// Everything the builder knows how to turn into a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Insert(InsertRequest),
    Update(UpdateRequest),
    Delete(DeleteRequest),
    Select(SelectRequest),
    Projection(ProjectionRequest),
    Report(Report),
}

/// Operation kind, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Insert,
    Update,
    Delete,
    Select,
    Projection,
    Report,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Insert(_) => OperationKind::Insert,
            Operation::Update(_) => OperationKind::Update,
            Operation::Delete(_) => OperationKind::Delete,
            Operation::Select(_) => OperationKind::Select,
            Operation::Projection(_) => OperationKind::Projection,
            Operation::Report(_) => OperationKind::Report,
        }
    }

    /// Build the statement for this operation.
    pub fn build(&self) -> ValidationResult<BoundStatement> {
        match self {
            Operation::Insert(req) => build_insert(req),
            Operation::Update(req) => build_update(req),
            Operation::Delete(req) => build_delete(req),
            Operation::Select(req) => build_select(req),
            Operation::Projection(req) => build_projection(req),
            Operation::Report(report) => Ok(report.statement()),
        }
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

fn column_list(columns: &[&Column]) -> String {
    columns
        .iter()
        .map(|c| c.ident())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Bind a value for a column, rejecting nulls in NOT NULL columns.
fn bind_column(column: &Column, value: BindValue) -> ValidationResult<BindValue> {
    if value.is_null() && !column.nullable {
        return Err(ValidationError::missing(column.name));
    }
    column.bind(value)
}

fn build_insert(req: &InsertRequest) -> ValidationResult<BoundStatement> {
    let entity = req.entity;
    let columns = entity.columns();
    if req.values.len() != columns.len() {
        return Err(ValidationError::ArityMismatch {
            table: entity.table().to_string(),
            expected: columns.len(),
            actual: req.values.len(),
        });
    }

    let all: Vec<&Column> = columns.iter().collect();
    let mut writer = StatementWriter::new(format!(
        "INSERT INTO {} ({}) VALUES (",
        entity.table_ident(),
        column_list(&all)
    ));

    let mut placeholders = Vec::with_capacity(columns.len());
    for (column, value) in columns.iter().zip(req.values.iter()) {
        let bound = bind_column(column, value.clone())?;
        placeholders.push(writer.bind(bound));
    }
    writer.push(&placeholders.join(", "));
    writer.push(")");
    Ok(writer.finish())
}

/// Resolve the key fields and check they name the full primary key exactly once.
fn resolve_key(
    entity: Entity,
    key: &[Field],
) -> ValidationResult<Vec<(&'static Column, BindValue)>> {
    let invalid = |reason: String| ValidationError::InvalidKey {
        table: entity.table().to_string(),
        reason,
    };

    let mut seen = HashSet::new();
    let mut resolved = Vec::with_capacity(key.len());
    for field in key {
        let column = entity.resolve(&field.column)?;
        if !entity.is_key(column.name) {
            return Err(invalid(format!("'{}' is not a key column", column.name)));
        }
        if !seen.insert(column.name) {
            return Err(invalid(format!("'{}' given more than once", column.name)));
        }
        if field.value.is_null() {
            return Err(invalid(format!("'{}' cannot be null", column.name)));
        }
        resolved.push((column, column.bind(field.value.clone())?));
    }

    if let Some(missing) = entity.key().iter().find(|k| !seen.contains(*k)) {
        return Err(ValidationError::missing(*missing));
    }
    Ok(resolved)
}

fn write_key_conditions(writer: &mut StatementWriter, key: Vec<(&'static Column, BindValue)>) {
    let conditions: Vec<String> = key
        .into_iter()
        .map(|(column, value)| format!("{} = {}", column.ident(), writer.bind(value)))
        .collect();
    writer.push(" WHERE ");
    writer.push(&conditions.join(" AND "));
}

fn build_update(req: &UpdateRequest) -> ValidationResult<BoundStatement> {
    let entity = req.entity;
    if req.set.is_empty() {
        return Err(ValidationError::NoUpdates);
    }

    let mut seen = HashSet::new();
    let mut assignments = Vec::with_capacity(req.set.len());
    for field in &req.set {
        let column = entity.resolve(&field.column)?;
        if entity.is_key(column.name) {
            return Err(ValidationError::InvalidKey {
                table: entity.table().to_string(),
                reason: format!("key column '{}' cannot be updated", column.name),
            });
        }
        if !seen.insert(column.name) {
            return Err(ValidationError::DuplicateColumn {
                column: column.name.to_string(),
            });
        }
        assignments.push((column, bind_column(column, field.value.clone())?));
    }
    let key = resolve_key(entity, &req.key)?;

    let mut writer = StatementWriter::new(format!("UPDATE {} SET ", entity.table_ident()));
    let set_clause: Vec<String> = assignments
        .into_iter()
        .map(|(column, value)| format!("{} = {}", column.ident(), writer.bind(value)))
        .collect();
    writer.push(&set_clause.join(", "));
    write_key_conditions(&mut writer, key);
    Ok(writer.finish())
}

fn build_delete(req: &DeleteRequest) -> ValidationResult<BoundStatement> {
    let entity = req.entity;
    let key = resolve_key(entity, &req.key)?;
    let mut writer = StatementWriter::new(format!("DELETE FROM {}", entity.table_ident()));
    write_key_conditions(&mut writer, key);
    Ok(writer.finish())
}

fn build_select(req: &SelectRequest) -> ValidationResult<BoundStatement> {
    let entity = req.entity;
    let all: Vec<&Column> = entity.columns().iter().collect();
    let mut writer = StatementWriter::new(format!(
        "SELECT {} FROM {}",
        column_list(&all),
        entity.table_ident()
    ));

    if req.filter.is_empty() {
        return Ok(writer.finish());
    }

    // Resolve everything before touching the writer.
    let mut resolved = Vec::with_capacity(req.filter.clauses().len());
    for clause in req.filter.clauses() {
        let predicate = &clause.predicate;
        let column = entity.resolve(&predicate.column)?;
        if predicate.value.is_null() {
            return Err(ValidationError::invalid(
                column.name,
                "null cannot be compared",
            ));
        }
        let value = column.bind(predicate.value.clone())?;
        resolved.push((clause.connective, column, predicate.comparison, value));
    }

    writer.push(" WHERE ");
    for (idx, (connective, column, comparison, value)) in resolved.into_iter().enumerate() {
        if idx > 0 {
            writer.push(" ");
            writer.push(connective.as_sql());
            writer.push(" ");
        }
        let placeholder = writer.bind(value);
        writer.push(&predicate_sql(column, comparison, &placeholder));
    }
    Ok(writer.finish())
}

fn predicate_sql(column: &Column, comparison: Comparison, placeholder: &str) -> String {
    format!("{} {} {}", column.ident(), comparison.as_sql(), placeholder)
}

fn build_projection(req: &ProjectionRequest) -> ValidationResult<BoundStatement> {
    let entity = req.entity;
    if req.columns.is_empty() {
        return Err(ValidationError::EmptyProjection);
    }

    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(req.columns.len());
    for name in &req.columns {
        let column = entity.resolve(name)?;
        if !seen.insert(column.name) {
            return Err(ValidationError::DuplicateColumn {
                column: name.clone(),
            });
        }
        columns.push(column);
    }

    let writer = StatementWriter::new(format!(
        "SELECT {} FROM {}",
        column_list(&columns),
        entity.table_ident()
    ));
    Ok(writer.finish())
}
