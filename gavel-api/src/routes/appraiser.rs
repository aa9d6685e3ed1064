//! Appraiser REST API Routes

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
    types::AppraiserItemsRequest,
};

/// POST /api/v1/appraisers/items - Items assessed by an appraiser
#[utoipa::path(
    post,
    path = "/api/v1/appraisers/items",
    tag = "Appraisers",
    request_body = AppraiserItemsRequest,
    responses(
        (status = 200, description = "Appraiser name with each assessed item", body = TabularResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    ),
)]
pub async fn appraised_items(
    State(state): State<AppState>,
    payload: Result<Json<AppraiserItemsRequest>, JsonRejection>,
) -> ApiResult<Json<TabularResponse>> {
    let Json(req) = payload?;
    let report = req.into_report()?;
    let response = db_helpers::run_report(state.executor.as_ref(), report).await?;
    Ok(Json(response))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/items", post(appraised_items))
        .with_state(state)
}
