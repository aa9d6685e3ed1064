//! Shared helpers for gavel-api integration tests.

#![allow(dead_code)]

pub mod executor;

#[cfg(feature = "db-tests")]
pub mod db;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use gavel_api::{create_api_router, ApiConfig, AppState};
use tower::ServiceExt;

pub use executor::{Call, RecordingExecutor};

/// Router wired to `executor`.
pub fn router(executor: Arc<RecordingExecutor>) -> Router {
    create_api_router(AppState::from_shared(executor), &ApiConfig::default())
}

/// Send one request and return the status with the parsed JSON body
/// (`Null` for non-JSON bodies).
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
