//! Report request types

use gavel_core::{Report, ValidationResult};
use serde::{Deserialize, Serialize};

use super::form::{self, FormValue};

/// Highest bid for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MaxBidRequest {
    #[serde(rename = "itemID")]
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub item_id: Option<FormValue<i32>>,
}

impl MaxBidRequest {
    pub fn into_report(self) -> ValidationResult<Report> {
        let item_id = form::required("itemID", form::number("itemID", self.item_id.as_ref())?)?;
        Ok(Report::MaxBid { item_id })
    }
}

/// Items assessed by one appraiser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AppraiserItemsRequest {
    #[serde(rename = "appraiserID")]
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub appraiser_id: Option<FormValue<i32>>,
}

impl AppraiserItemsRequest {
    pub fn into_report(self) -> ValidationResult<Report> {
        let appraiser_id = form::required(
            "appraiserID",
            form::number("appraiserID", self.appraiser_id.as_ref())?,
        )?;
        Ok(Report::AppraisedItems { appraiser_id })
    }
}

/// Session venues whose smallest session lists at least `numberItems`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MinItemsRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub number_items: Option<FormValue<i32>>,
}

impl MinItemsRequest {
    pub fn into_report(self) -> ValidationResult<Report> {
        let min_items = form::required(
            "numberItems",
            form::number("numberItems", self.number_items.as_ref())?,
        )?;
        Ok(Report::SessionsWithMinItems { min_items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gavel_core::ValidationError;

    #[test]
    fn test_report_requests() {
        let req: MaxBidRequest = serde_json::from_str(r#"{"itemID":"12"}"#).unwrap();
        assert_eq!(req.into_report(), Ok(Report::MaxBid { item_id: 12 }));

        let req: AppraiserItemsRequest = serde_json::from_str(r#"{"appraiserID":3}"#).unwrap();
        assert_eq!(req.into_report(), Ok(Report::AppraisedItems { appraiser_id: 3 }));

        let req: MinItemsRequest = serde_json::from_str(r#"{"numberItems":"5"}"#).unwrap();
        assert_eq!(req.into_report(), Ok(Report::SessionsWithMinItems { min_items: 5 }));
    }

    #[test]
    fn test_missing_report_argument() {
        let req: MaxBidRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.into_report(), Err(ValidationError::missing("itemID")));
    }
}
