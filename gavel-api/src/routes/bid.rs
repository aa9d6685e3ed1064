//! Bid REST API Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use gavel_core::TabularResponse;

use crate::{
    db_helpers,
    error::{ApiError, ApiResult},
    state::AppState,
    types::MaxBidRequest,
};

/// POST /api/v1/bids/max - Highest bid for an item
#[utoipa::path(
    post,
    path = "/api/v1/bids/max",
    tag = "Bids",
    request_body = MaxBidRequest,
    responses(
        (status = 200, description = "Item ID and its highest bid; empty when no bids", body = TabularResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    ),
)]
pub async fn max_bid(
    State(state): State<AppState>,
    payload: Result<Json<MaxBidRequest>, JsonRejection>,
) -> ApiResult<Json<TabularResponse>> {
    let Json(req) = payload?;
    let report = req.into_report()?;
    let response = db_helpers::run_report(state.executor.as_ref(), report).await?;
    Ok(Json(response))
}

pub fn create_router(state: AppState) -> Router {
    Router::new().route("/max", post(max_bid)).with_state(state)
}
