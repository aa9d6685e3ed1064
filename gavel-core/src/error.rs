//! Error types for request validation

use crate::entity::ColumnType;
use thiserror::Error;

/// Validation errors raised while turning a request into a bound statement.
///
/// Every variant is produced before any statement reaches the database.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown comparison operator: '{token}'")]
    UnknownOperator { token: String },

    #[error("Unknown connective: '{token}' (expected AND or OR)")]
    UnknownConnective { token: String },

    #[error("Unknown column '{column}' for {table}")]
    UnknownColumn { table: String, column: String },

    #[error("Column '{column}' requested more than once")]
    DuplicateColumn { column: String },

    #[error("At least one column must be requested")]
    EmptyProjection,

    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Column '{column}' expects a {expected} value")]
    TypeMismatch { column: String, expected: ColumnType },

    #[error("{table} expects {expected} values, got {actual}")]
    ArityMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid key for {table}: {reason}")]
    InvalidKey { table: String, reason: String },

    #[error("At least one field must be provided for update")]
    NoUpdates,
}

impl ValidationError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::RequiredFieldMissing {
            field: field.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for validation.
pub type ValidationResult<T> = Result<T, ValidationError>;
