//! Database Connection Pool Module
//!
//! PostgreSQL connection pooling with deadpool-postgres, and the production
//! [`StatementExecutor`]. Statements arrive fully built and bound; nothing in
//! this module assembles SQL.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use gavel_core::{BoundStatement, Row};
use tokio_postgres::NoTls;

use crate::error::{ApiError, ApiResult};
use crate::executor::StatementExecutor;
use crate::row_mapping::decode_row;

// ============================================================================
// CONNECTION POOL CONFIGURATION
// ============================================================================

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Maximum pool size
    pub max_size: usize,
    /// How long a request waits for a free connection
    pub timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "gavel".to_string(),
            user: "postgres".to_string(),
            password: "".to_string(),
            max_size: 3,
            timeout: Duration::from_secs(60),
        }
    }
}

impl DbConfig {
    /// Create a new database configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GAVEL_DB_HOST` (default: localhost)
    /// - `GAVEL_DB_PORT` (default: 5432)
    /// - `GAVEL_DB_NAME` (default: gavel)
    /// - `GAVEL_DB_USER` (default: postgres)
    /// - `GAVEL_DB_PASSWORD` (default: empty)
    /// - `GAVEL_DB_POOL_SIZE` (default: 3)
    /// - `GAVEL_DB_TIMEOUT`: wait timeout in seconds (default: 60)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("GAVEL_DB_HOST").unwrap_or(defaults.host),
            port: std::env::var("GAVEL_DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            dbname: std::env::var("GAVEL_DB_NAME").unwrap_or(defaults.dbname),
            user: std::env::var("GAVEL_DB_USER").unwrap_or(defaults.user),
            password: std::env::var("GAVEL_DB_PASSWORD").unwrap_or_default(),
            max_size: std::env::var("GAVEL_DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|size| *size > 0)
                .unwrap_or(defaults.max_size),
            timeout: std::env::var("GAVEL_DB_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    /// Create a connection pool from this configuration.
    ///
    /// No connection is opened here; the first one is made on first use.
    pub fn create_pool(&self) -> ApiResult<Pool> {
        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.dbname = Some(self.dbname.clone());
        cfg.user = Some(self.user.clone());
        cfg.password = Some(self.password.clone());

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let mut pool_cfg = PoolConfig::new(self.max_size);
        pool_cfg.timeouts.wait = Some(self.timeout);
        cfg.pool = Some(pool_cfg);

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| ApiError::service_unavailable(format!("Failed to create pool: {}", e)))?;

        tracing::info!(
            host = %self.host,
            port = self.port,
            dbname = %self.dbname,
            max_size = self.max_size,
            wait_timeout_secs = self.timeout.as_secs(),
            "Database pool created"
        );
        Ok(pool)
    }
}

// ============================================================================
// DATABASE CLIENT WRAPPER
// ============================================================================

/// Database client that wraps a connection pool.
#[derive(Clone)]
pub struct DbClient {
    pool: Pool,
}

impl DbClient {
    /// Create a new database client with the given pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a new database client from configuration.
    pub fn from_config(config: &DbConfig) -> ApiResult<Self> {
        let pool = config.create_pool()?;
        Ok(Self::new(pool))
    }

    /// Get the current pool size for observability.
    pub fn pool_size(&self) -> usize {
        self.pool.status().size
    }

    /// Close the pool. Waiting and later acquisitions fail with `Closed`.
    pub fn close(&self) {
        self.pool.close();
        tracing::info!("Database pool closed");
    }

    /// Get a connection from the pool.
    ///
    /// The returned object goes back to the pool when dropped.
    async fn get_conn(&self) -> ApiResult<deadpool_postgres::Object> {
        self.pool.get().await.map_err(ApiError::from)
    }
}

#[async_trait]
impl StatementExecutor for DbClient {
    async fn execute(&self, stmt: &BoundStatement) -> ApiResult<u64> {
        tracing::debug!(sql = stmt.sql(), params = stmt.params().len(), "execute");
        let conn = self.get_conn().await?;
        let affected = conn.execute(stmt.sql(), &stmt.param_refs()).await?;
        Ok(affected)
    }

    async fn query(&self, stmt: &BoundStatement) -> ApiResult<Vec<Row>> {
        tracing::debug!(sql = stmt.sql(), params = stmt.params().len(), "query");
        let conn = self.get_conn().await?;
        let rows = conn.query(stmt.sql(), &stmt.param_refs()).await?;
        rows.iter().map(decode_row).collect()
    }

    async fn execute_batch(&self, script: &str) -> ApiResult<()> {
        tracing::debug!(script_len = script.len(), "batch_execute");
        let conn = self.get_conn().await?;
        conn.batch_execute(script).await?;
        Ok(())
    }

    async fn ping(&self) -> ApiResult<()> {
        let conn = self.get_conn().await?;
        conn.query_one("SELECT 1", &[]).await?;
        Ok(())
    }
}
