//! Listed Item REST API Routes
//!
//! Items listed at an auction session (`ForSaleItems_ListedAt_Wins`).

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use gavel_core::{Entity, TabularResponse};

use crate::{
    db_helpers,
    error::{ApiError, ApiResult},
    state::AppState,
    types::CreateListedItemRequest,
};

/// GET /api/v1/listed-items - List all listed items
#[utoipa::path(
    get,
    path = "/api/v1/listed-items",
    tag = "Listed Items",
    responses(
        (status = 200, description = "All listed items, positional", body = TabularResponse),
        (status = 503, description = "Database unavailable", body = ApiError),
    ),
)]
pub async fn list_listed_items(State(state): State<AppState>) -> ApiResult<Json<TabularResponse>> {
    let response = db_helpers::select_all(state.executor.as_ref(), Entity::ListedItem).await?;
    Ok(Json(response))
}

/// POST /api/v1/listed-items - List an item at a session
#[utoipa::path(
    post,
    path = "/api/v1/listed-items",
    tag = "Listed Items",
    request_body = CreateListedItemRequest,
    responses(
        (status = 201, description = "Item listed", body = TabularResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 500, description = "Session or customer does not exist", body = ApiError),
    ),
)]
pub async fn create_listed_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateListedItemRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = payload?;
    let op = req.into_operation()?;
    let response = db_helpers::run_insert(state.executor.as_ref(), op).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/listed-items/reset - Drop and recreate the listed items table
#[utoipa::path(
    post,
    path = "/api/v1/listed-items/reset",
    tag = "Listed Items",
    responses(
        (status = 200, description = "Table recreated", body = TabularResponse),
        (status = 500, description = "Reset failed", body = ApiError),
    ),
)]
pub async fn reset_listed_items(State(state): State<AppState>) -> ApiResult<Json<TabularResponse>> {
    let response = db_helpers::reset_table(state.executor.as_ref(), Entity::ListedItem).await?;
    Ok(Json(response))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_listed_items).post(create_listed_item))
        .route("/reset", post(reset_listed_items))
        .with_state(state)
}
