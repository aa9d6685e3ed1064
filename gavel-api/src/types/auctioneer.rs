//! Auctioneer projection types

use gavel_core::{Entity, Operation, ProjectionRequest};
use serde::{Deserialize, Serialize};

/// Request to read chosen auctioneer columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuctioneerProjectionRequest {
    /// Column names, in the order they should come back
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl AuctioneerProjectionRequest {
    pub fn into_operation(self) -> Operation {
        Operation::Projection(ProjectionRequest {
            entity: Entity::Auctioneer,
            columns: self.attributes,
        })
    }
}
