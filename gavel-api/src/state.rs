//! Shared application state for Axum routers.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;

use crate::executor::{SharedExecutor, StatementExecutor};

/// Application-wide state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    /// Runs every statement; backed by the connection pool in production.
    pub executor: SharedExecutor,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(executor: impl StatementExecutor + 'static) -> Self {
        Self::from_shared(Arc::new(executor))
    }

    pub fn from_shared(executor: SharedExecutor) -> Self {
        Self {
            executor,
            start_time: Instant::now(),
        }
    }
}

impl FromRef<AppState> for SharedExecutor {
    fn from_ref(state: &AppState) -> Self {
        state.executor.clone()
    }
}
