//! Delivery Vehicle REST API Routes
//!
//! Filtered vehicle search and the full-coverage report (vehicles that
//! collect from every storage facility).

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use gavel_core::{Report, TabularResponse};

use crate::{
    db_helpers,
    error::{ApiError, ApiResult},
    state::AppState,
    types::VehicleSearchRequest,
};

/// POST /api/v1/delivery-vehicles/search - Filtered vehicle search
#[utoipa::path(
    post,
    path = "/api/v1/delivery-vehicles/search",
    tag = "Delivery Vehicles",
    request_body = VehicleSearchRequest,
    responses(
        (status = 200, description = "Matching vehicles, positional", body = TabularResponse),
        (status = 400, description = "Unknown operator or connective", body = ApiError),
    ),
)]
pub async fn search_vehicles(
    State(state): State<AppState>,
    payload: Result<Json<VehicleSearchRequest>, JsonRejection>,
) -> ApiResult<Json<TabularResponse>> {
    let Json(req) = payload?;
    let op = req.into_operation()?;
    let response = db_helpers::run_select(state.executor.as_ref(), op).await?;
    Ok(Json(response))
}

/// GET /api/v1/delivery-vehicles/full-coverage - Vehicles serving every facility
#[utoipa::path(
    get,
    path = "/api/v1/delivery-vehicles/full-coverage",
    tag = "Delivery Vehicles",
    responses(
        (status = 200, description = "License plates", body = TabularResponse),
        (status = 503, description = "Database unavailable", body = ApiError),
    ),
)]
pub async fn full_coverage(State(state): State<AppState>) -> ApiResult<Json<TabularResponse>> {
    let response =
        db_helpers::run_report(state.executor.as_ref(), Report::FullCoverageVehicles).await?;
    Ok(Json(response))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/search", post(search_vehicles))
        .route("/full-coverage", get(full_coverage))
        .with_state(state)
}
