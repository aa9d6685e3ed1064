//! Error Types for GAVEL API
//!
//! This module defines error handling for the API layer, including:
//! - ApiError struct for structured error responses
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation for Axum HTTP responses
//!
//! Every failure leaves the service as `{"success": false, "code", "message"}`,
//! with the database's SQLSTATE in `err` when one is available.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gavel_core::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio_postgres::error::SqlState;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
///
/// Each error code maps to a specific HTTP status code and belongs to one
/// [`ErrorCategory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================================================
    // Validation Errors (400)
    // ========================================================================
    /// Request shape is not allowed (unknown operator, column, key, ...)
    ValidationFailed,

    /// Request contains invalid input data
    InvalidInput,

    /// Required field is missing from request
    MissingField,

    // ========================================================================
    // Not Found Errors (404)
    // ========================================================================
    /// No row matched the given key
    EntityNotFound,

    // ========================================================================
    // Execution Errors (500)
    // ========================================================================
    /// A referenced parent row does not exist
    ForeignKeyViolation,

    /// A row with the same key already exists
    UniqueViolation,

    /// A NOT NULL column received null
    NotNullViolation,

    /// A CHECK constraint rejected the row
    CheckViolation,

    /// Database operation failed
    DatabaseError,

    /// Internal server error
    InternalError,

    // ========================================================================
    // Connectivity Errors (503)
    // ========================================================================
    /// Database is unreachable or the pool is closed
    ServiceUnavailable,

    /// No pooled connection became free within the wait timeout
    ConnectionPoolExhausted,
}

/// Coarse error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Rejected before any statement ran.
    Validation,
    /// Statement ran but matched nothing.
    NotFound,
    /// Statement failed in the database.
    Execution,
    /// No usable database connection.
    Connectivity,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Execution => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCategory::Connectivity => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::ValidationFailed | ErrorCode::InvalidInput | ErrorCode::MissingField => {
                ErrorCategory::Validation
            }

            ErrorCode::EntityNotFound => ErrorCategory::NotFound,

            ErrorCode::ForeignKeyViolation
            | ErrorCode::UniqueViolation
            | ErrorCode::NotNullViolation
            | ErrorCode::CheckViolation
            | ErrorCode::DatabaseError
            | ErrorCode::InternalError => ErrorCategory::Execution,

            ErrorCode::ServiceUnavailable | ErrorCode::ConnectionPoolExhausted => {
                ErrorCategory::Connectivity
            }
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Request validation failed",
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::MissingField => "Required field is missing",
            ErrorCode::EntityNotFound => "Entity not found",
            ErrorCode::ForeignKeyViolation => "Referenced key does not exist",
            ErrorCode::UniqueViolation => "A row with this key already exists",
            ErrorCode::NotNullViolation => "A required column was null",
            ErrorCode::CheckViolation => "Value violates a check constraint",
            ErrorCode::DatabaseError => "Database operation failed",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::ServiceUnavailable => "Service temporarily unavailable",
            ErrorCode::ConnectionPoolExhausted => "Connection pool exhausted",
        }
    }

    /// Classify a SQLSTATE reported by the database.
    pub fn from_sql_state(state: &SqlState) -> Self {
        if *state == SqlState::FOREIGN_KEY_VIOLATION {
            ErrorCode::ForeignKeyViolation
        } else if *state == SqlState::UNIQUE_VIOLATION {
            ErrorCode::UniqueViolation
        } else if *state == SqlState::NOT_NULL_VIOLATION {
            ErrorCode::NotNullViolation
        } else if *state == SqlState::CHECK_VIOLATION {
            ErrorCode::CheckViolation
        } else {
            ErrorCode::DatabaseError
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiError {
    /// Always false
    #[serde(default)]
    pub success: bool,

    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// SQLSTATE of the failing statement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            message: message.into(),
            err: None,
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Attach the SQLSTATE reported by the database.
    pub fn with_sql_state(mut self, state: impl Into<String>) -> Self {
        self.err = Some(state.into());
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// No row of `entity_type` matched `key`.
    pub fn entity_not_found(entity_type: &str, key: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::EntityNotFound,
            format!("{} with key {} not found", entity_type, key),
        )
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn database_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    pub fn connection_pool_exhausted() -> Self {
        Self::from_code(ErrorCode::ConnectionPoolExhausted)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.err {
            Some(state) => write!(f, "{}: {} ({})", self.code, self.message, state),
            None => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        tracing::warn!(error = %err, "Rejected request");

        let code = match &err {
            ValidationError::RequiredFieldMissing { .. } => ErrorCode::MissingField,
            ValidationError::InvalidValue { .. }
            | ValidationError::TypeMismatch { .. }
            | ValidationError::NoUpdates => ErrorCode::InvalidInput,
            ValidationError::UnknownOperator { .. }
            | ValidationError::UnknownConnective { .. }
            | ValidationError::UnknownColumn { .. }
            | ValidationError::DuplicateColumn { .. }
            | ValidationError::EmptyProjection
            | ValidationError::ArityMismatch { .. }
            | ValidationError::InvalidKey { .. } => ErrorCode::ValidationFailed,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Convert from tokio_postgres::Error to ApiError.
///
/// Integrity violations keep their SQLSTATE so callers can tell them apart
/// from generic failures.
impl From<tokio_postgres::Error> for ApiError {
    fn from(err: tokio_postgres::Error) -> Self {
        tracing::error!("Database error: {:?}", err);

        if err.is_closed() {
            return ApiError::service_unavailable("Database connection was closed");
        }

        match err.code() {
            Some(state) => ApiError::from_code(ErrorCode::from_sql_state(state))
                .with_sql_state(state.code()),
            None => ApiError::database_error("Database operation failed"),
        }
    }
}

/// Convert from deadpool_postgres::PoolError to ApiError.
impl From<deadpool_postgres::PoolError> for ApiError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        tracing::error!("Connection pool error: {:?}", err);

        match err {
            deadpool_postgres::PoolError::Timeout(_) => ApiError::connection_pool_exhausted(),
            deadpool_postgres::PoolError::Closed => {
                ApiError::service_unavailable("Database connection pool is closed")
            }
            deadpool_postgres::PoolError::Backend(_) => {
                ApiError::service_unavailable("Failed to connect to the database")
            }
            _ => ApiError::internal_error("Failed to acquire database connection"),
        }
    }
}

/// Malformed JSON bodies get the same envelope as every other failure.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(error = %rejection, "Rejected request body");
        ApiError::invalid_input(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!(error = %rejection, "Rejected path parameter");
        ApiError::invalid_input(rejection.body_text())
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use gavel_core::ColumnType;

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(ErrorCode::ValidationFailed.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::MissingField.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::EntityNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::ForeignKeyViolation.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::ConnectionPoolExhausted.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_sql_state_classification() {
        assert_eq!(
            ErrorCode::from_sql_state(&SqlState::FOREIGN_KEY_VIOLATION),
            ErrorCode::ForeignKeyViolation
        );
        assert_eq!(
            ErrorCode::from_sql_state(&SqlState::UNIQUE_VIOLATION),
            ErrorCode::UniqueViolation
        );
        assert_eq!(
            ErrorCode::from_sql_state(&SqlState::UNDEFINED_TABLE),
            ErrorCode::DatabaseError
        );
    }

    #[test]
    fn test_validation_error_mapping() {
        let err = ApiError::from(ValidationError::UnknownOperator {
            token: "LIKE".to_string(),
        });
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("LIKE"));

        let err = ApiError::from(ValidationError::missing("plate"));
        assert_eq!(err.code, ErrorCode::MissingField);

        let err = ApiError::from(ValidationError::TypeMismatch {
            column: "payloadCapacity".to_string(),
            expected: ColumnType::Int,
        });
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_envelope_serialization() -> Result<(), serde_json::Error> {
        let err = ApiError::from_code(ErrorCode::ForeignKeyViolation).with_sql_state("23503");
        let json = serde_json::to_value(&err)?;

        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "code": "FOREIGN_KEY_VIOLATION",
                "message": "Referenced key does not exist",
                "err": "23503"
            })
        );
        Ok(())
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::database_error("Connection failed").with_sql_state("XX000");
        let display = format!("{}", err);

        assert!(display.contains("DatabaseError"));
        assert!(display.contains("Connection failed"));
        assert!(display.contains("XX000"));
    }

    #[test]
    fn test_pool_wait_timeout_is_unavailable() {
        use deadpool_postgres::{PoolError, TimeoutType};

        let err = ApiError::from(PoolError::Timeout(TimeoutType::Wait));
        assert_eq!(err.code, ErrorCode::ConnectionPoolExhausted);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.category(), ErrorCategory::Connectivity);
    }

    #[test]
    fn test_closed_pool_is_unavailable() {
        let err = ApiError::from(deadpool_postgres::PoolError::Closed);
        assert_eq!(err.code, ErrorCode::ServiceUnavailable);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
