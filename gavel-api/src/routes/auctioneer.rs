//! Auctioneer REST API Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use gavel_core::ProjectionResponse;

use crate::{
    db_helpers,
    error::{ApiError, ApiResult},
    state::AppState,
    types::AuctioneerProjectionRequest,
};

/// POST /api/v1/auctioneers/projection - Read chosen auctioneer columns
///
/// Cells come back labelled with the requested names, in request order;
/// nulls read as "N/A".
#[utoipa::path(
    post,
    path = "/api/v1/auctioneers/projection",
    tag = "Auctioneers",
    request_body = AuctioneerProjectionRequest,
    responses(
        (status = 200, description = "Projected rows", body = ProjectionResponse),
        (status = 400, description = "Unknown, duplicate or missing columns", body = ApiError),
    ),
)]
pub async fn project_auctioneers(
    State(state): State<AppState>,
    payload: Result<Json<AuctioneerProjectionRequest>, JsonRejection>,
) -> ApiResult<Json<ProjectionResponse>> {
    let Json(req) = payload?;
    let response = db_helpers::run_projection(state.executor.as_ref(), req.into_operation()).await?;
    Ok(Json(response))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/projection", post(project_auctioneers))
        .with_state(state)
}
