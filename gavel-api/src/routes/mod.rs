//! REST API Route Modules
//!
//! One module per resource, each exposing `create_router(state)`. This module
//! nests them under `/api/v1`, adds `/health` and `/openapi.json`, and applies
//! the CORS and request tracing layers.

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;
use crate::state::AppState;

pub mod appraiser;
pub mod auction_session;
pub mod auctioneer;
pub mod bid;
pub mod delivery_vehicle;
pub mod health;
pub mod item;
pub mod listed_item;

// ============================================================================
// OPENAPI ENDPOINTS
// ============================================================================

/// Handler for /openapi.json endpoint.
#[cfg(feature = "openapi")]
async fn openapi_json() -> impl axum::response::IntoResponse {
    use utoipa::OpenApi;
    axum::Json(crate::openapi::ApiDoc::openapi())
}

// ============================================================================
// ROUTER ASSEMBLY
// ============================================================================

/// Build the full application router.
pub fn create_api_router(state: AppState, api_config: &ApiConfig) -> Router {
    let api_routes = Router::new()
        .nest("/items", item::create_router(state.clone()))
        .nest("/listed-items", listed_item::create_router(state.clone()))
        .nest("/auction-sessions", auction_session::create_router(state.clone()))
        .nest("/auctioneers", auctioneer::create_router(state.clone()))
        .nest("/delivery-vehicles", delivery_vehicle::create_router(state.clone()))
        .nest("/bids", bid::create_router(state.clone()))
        .nest("/appraisers", appraiser::create_router(state.clone()));

    #[allow(unused_mut)]
    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health::create_router(state));

    #[cfg(feature = "openapi")]
    {
        router = router.route("/openapi.json", axum::routing::get(openapi_json));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(api_config))
}

/// Build the CORS layer from ApiConfig.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any)
    } else {
        tracing::info!("CORS: allowing origins: {:?}", config.cors_origins);
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
