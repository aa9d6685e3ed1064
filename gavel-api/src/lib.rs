//! GAVEL API - REST Layer for the Auction Records Service
//!
//! Axum routes over a pooled PostgreSQL connection. Requests are validated and
//! turned into bound statements by `gavel-core`; this crate owns transport,
//! the connection pool, error classification and response envelopes.

pub mod config;
pub mod db;
pub mod db_helpers;
pub mod error;
pub mod executor;
pub mod logging;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod row_mapping;
pub mod state;
pub mod types;

// Re-export commonly used types
pub use config::ApiConfig;
pub use db::{DbClient, DbConfig};
pub use error::{ApiError, ApiResult, ErrorCategory, ErrorCode};
pub use executor::{SharedExecutor, StatementExecutor};
pub use logging::{init_logging, LogConfig, LogFormat};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use state::AppState;
pub use types::*;
