//! OpenAPI Specification for the Gavel API
//!
//! Generated by utoipa from the route annotations and request/response types.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::health::{ComponentHealth, HealthDetails, HealthResponse, HealthStatus};
use crate::routes::{
    appraiser, auction_session, auctioneer, bid, delivery_vehicle, health, item, listed_item,
};
use crate::types::*;

use gavel_core::{ProjectionResponse, TabularResponse};

/// OpenAPI document for the Gavel API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gavel API",
        version = "0.1.0",
        description = "Auction house records: items, listings, sessions, bids, appraisals and deliveries"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Items", description = "Items offered for sale"),
        (name = "Listed Items", description = "Items listed at an auction session"),
        (name = "Auction Sessions", description = "Sessions and session reports"),
        (name = "Auctioneers", description = "Auctioneer column projection"),
        (name = "Delivery Vehicles", description = "Vehicle search and coverage report"),
        (name = "Bids", description = "Bid reports"),
        (name = "Appraisers", description = "Appraisal reports"),
        (name = "Health", description = "Liveness and readiness probes")
    ),
    paths(
        item::list_items,
        item::create_item,
        item::delete_item,
        item::reset_items,
        listed_item::list_listed_items,
        listed_item::create_listed_item,
        listed_item::reset_listed_items,
        auction_session::list_sessions,
        auction_session::update_session,
        auction_session::sessions_with_min_items,
        auction_session::above_average_commission,
        auctioneer::project_auctioneers,
        delivery_vehicle::search_vehicles,
        delivery_vehicle::full_coverage,
        bid::max_bid,
        appraiser::appraised_items,
        health::ping,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        TabularResponse,
        ProjectionResponse,
        CreateItemRequest,
        CreateListedItemRequest,
        UpdateAuctionSessionRequest,
        AuctioneerProjectionRequest,
        VehicleSearchRequest,
        MaxBidRequest,
        AppraiserItemsRequest,
        MinItemsRequest,
        HealthResponse,
        HealthStatus,
        HealthDetails,
        ComponentHealth,
    ))
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI document as a JSON string.
    pub fn to_json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::openapi())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_generation() {
        let openapi = ApiDoc::openapi();
        assert_eq!(openapi.info.title, "Gavel API");
        assert_eq!(openapi.info.version, "0.1.0");
    }

    #[test]
    fn test_openapi_json_serialization() -> Result<(), String> {
        let json = ApiDoc::to_json().map_err(|e| format!("Failed to serialize OpenAPI: {}", e))?;
        serde_json::from_str::<serde_json::Value>(&json)
            .map_err(|e| format!("Generated JSON invalid: {}", e))?;
        assert!(json.contains("Gavel API"));
        Ok(())
    }

    #[test]
    fn test_openapi_paths_exist() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        assert!(paths.contains_key("/api/v1/items"));
        assert!(paths.contains_key("/api/v1/items/{item_id}"));
        assert!(paths.contains_key("/api/v1/listed-items"));
        assert!(paths.contains_key("/api/v1/auction-sessions"));
        assert!(paths.contains_key("/api/v1/auctioneers/projection"));
        assert!(paths.contains_key("/api/v1/delivery-vehicles/search"));
        assert!(paths.contains_key("/api/v1/bids/max"));
        assert!(paths.contains_key("/api/v1/appraisers/items"));
        assert!(paths.contains_key("/health/ready"));
    }
}
