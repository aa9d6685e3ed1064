//! Auction Session REST API Routes
//!
//! Sessions are keyed by (event date, time, address). Besides listing and
//! updating, this module serves the two session reports.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use gavel_core::{Entity, Report, TabularResponse};

use crate::{
    db_helpers,
    error::{ApiError, ApiResult},
    state::AppState,
    types::{MinItemsRequest, UpdateAuctionSessionRequest},
};

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/v1/auction-sessions - List all sessions
#[utoipa::path(
    get,
    path = "/api/v1/auction-sessions",
    tag = "Auction Sessions",
    responses(
        (status = 200, description = "All sessions, positional", body = TabularResponse),
        (status = 503, description = "Database unavailable", body = ApiError),
    ),
)]
pub async fn list_sessions(State(state): State<AppState>) -> ApiResult<Json<TabularResponse>> {
    let response = db_helpers::select_all(state.executor.as_ref(), Entity::AuctionSession).await?;
    Ok(Json(response))
}

/// PUT /api/v1/auction-sessions - Update a session by key
#[utoipa::path(
    put,
    path = "/api/v1/auction-sessions",
    tag = "Auction Sessions",
    request_body = UpdateAuctionSessionRequest,
    responses(
        (status = 200, description = "Session updated", body = TabularResponse),
        (status = 400, description = "Invalid request or nothing to update", body = ApiError),
        (status = 404, description = "No session with that key", body = ApiError),
        (status = 500, description = "Auctioneer does not exist or update failed", body = ApiError),
    ),
)]
pub async fn update_session(
    State(state): State<AppState>,
    payload: Result<Json<UpdateAuctionSessionRequest>, JsonRejection>,
) -> ApiResult<Json<TabularResponse>> {
    let Json(req) = payload?;
    let key = format!(
        "{} {} {}",
        req.auctiondate.as_deref().unwrap_or_default(),
        req.time.as_deref().unwrap_or_default(),
        req.address.as_deref().unwrap_or_default()
    );
    let op = req.into_operation()?;
    let response =
        db_helpers::run_keyed_mutation(state.executor.as_ref(), op, "AuctionSession", key).await?;
    Ok(Json(response))
}

/// POST /api/v1/auction-sessions/min-items - Venues whose smallest session lists enough items
#[utoipa::path(
    post,
    path = "/api/v1/auction-sessions/min-items",
    tag = "Auction Sessions",
    request_body = MinItemsRequest,
    responses(
        (status = 200, description = "Matching address and phone number pairs", body = TabularResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    ),
)]
pub async fn sessions_with_min_items(
    State(state): State<AppState>,
    payload: Result<Json<MinItemsRequest>, JsonRejection>,
) -> ApiResult<Json<TabularResponse>> {
    let Json(req) = payload?;
    let report = req.into_report()?;
    let response = db_helpers::run_report(state.executor.as_ref(), report).await?;
    Ok(Json(response))
}

/// GET /api/v1/auction-sessions/above-average-commission - Dates beating the average commission
#[utoipa::path(
    get,
    path = "/api/v1/auction-sessions/above-average-commission",
    tag = "Auction Sessions",
    responses(
        (status = 200, description = "Dates with their average commission", body = TabularResponse),
        (status = 503, description = "Database unavailable", body = ApiError),
    ),
)]
pub async fn above_average_commission(
    State(state): State<AppState>,
) -> ApiResult<Json<TabularResponse>> {
    let response =
        db_helpers::run_report(state.executor.as_ref(), Report::AboveAverageCommission).await?;
    Ok(Json(response))
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_sessions).put(update_session))
        .route("/min-items", post(sessions_with_min_items))
        .route("/above-average-commission", get(above_average_commission))
        .with_state(state)
}
