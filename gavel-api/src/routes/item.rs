//! Item REST API Routes
//!
//! Items offered for sale (`Items_Sells`): list, register, delete by ID and
//! an admin reset of the table.

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use gavel_core::{Entity, TabularResponse};

use crate::{
    db_helpers,
    error::{ApiError, ApiResult},
    state::AppState,
    types::{delete_item as delete_item_operation, CreateItemRequest},
};

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/v1/items - List all items
#[utoipa::path(
    get,
    path = "/api/v1/items",
    tag = "Items",
    responses(
        (status = 200, description = "All items, positional", body = TabularResponse),
        (status = 503, description = "Database unavailable", body = ApiError),
    ),
)]
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<TabularResponse>> {
    let response = db_helpers::select_all(state.executor.as_ref(), Entity::Item).await?;
    Ok(Json(response))
}

/// POST /api/v1/items - Register an item
#[utoipa::path(
    post,
    path = "/api/v1/items",
    tag = "Items",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = TabularResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 500, description = "Seller does not exist or insert failed", body = ApiError),
    ),
)]
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = payload?;
    let op = req.into_operation()?;
    let response = db_helpers::run_insert(state.executor.as_ref(), op).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// DELETE /api/v1/items/{item_id} - Delete an item
#[utoipa::path(
    delete,
    path = "/api/v1/items/{item_id}",
    tag = "Items",
    params(
        ("item_id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted", body = TabularResponse),
        (status = 404, description = "Item not found", body = ApiError),
        (status = 500, description = "Item is still referenced", body = ApiError),
    ),
)]
pub async fn delete_item(
    State(state): State<AppState>,
    item_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<TabularResponse>> {
    let Path(item_id) = item_id?;
    let op = delete_item_operation(item_id);
    let response =
        db_helpers::run_keyed_mutation(state.executor.as_ref(), op, "Item", item_id).await?;
    Ok(Json(response))
}

/// POST /api/v1/items/reset - Drop and recreate the items table
#[utoipa::path(
    post,
    path = "/api/v1/items/reset",
    tag = "Items",
    responses(
        (status = 200, description = "Table recreated", body = TabularResponse),
        (status = 500, description = "Reset failed", body = ApiError),
    ),
)]
pub async fn reset_items(State(state): State<AppState>) -> ApiResult<Json<TabularResponse>> {
    let response = db_helpers::reset_table(state.executor.as_ref(), Entity::Item).await?;
    Ok(Json(response))
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/reset", post(reset_items))
        .route("/:item_id", delete(delete_item))
        .with_state(state)
}
