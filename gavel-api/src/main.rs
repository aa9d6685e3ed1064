//! GAVEL API Server Entry Point
//!
//! Bootstraps logging and configuration, creates the connection pool and
//! serves the Axum router until SIGINT or SIGTERM.

use std::sync::Arc;

use axum::Router;
use gavel_api::{
    create_api_router, init_logging, ApiConfig, ApiError, ApiResult, AppState, DbClient,
    DbConfig, LogConfig, StatementExecutor,
};

#[tokio::main]
async fn main() -> ApiResult<()> {
    init_logging(&LogConfig::from_env())?;

    let db_config = DbConfig::from_env();
    let db = DbClient::from_config(&db_config)?;

    // Requests fail with 503 until the database is reachable; startup does not.
    if let Err(e) = db.ping().await {
        tracing::warn!(code = ?e.code, message = %e.message, "Database not reachable at startup");
    }

    let api_config = ApiConfig::from_env();
    let state = AppState::from_shared(Arc::new(db.clone()));
    let app: Router = create_api_router(state, &api_config);

    let addr = api_config.bind_addr()?;
    tracing::info!(%addr, "Starting Gavel API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;

    db.close();
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
