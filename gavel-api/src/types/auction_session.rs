//! Auction-session API types

use gavel_core::{BindValue, Entity, Field, Operation, UpdateRequest, ValidationResult};
use serde::{Deserialize, Serialize};

use super::form::{self, FormValue};

/// Request to update an auction session identified by date, time and address.
///
/// Only the fields present in the request are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuctionSessionRequest {
    /// Session date (YYYY-MM-DD)
    #[serde(default)]
    pub auctiondate: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i32>))]
    pub total_attendees: Option<FormValue<i32>>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i64>))]
    pub phone_number: Option<FormValue<i64>>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i32>))]
    pub num_items: Option<FormValue<i32>>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>))]
    pub commission_percent: Option<FormValue<f64>>,
    /// Operating auctioneer
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i32>))]
    pub employee_id: Option<FormValue<i32>>,
}

impl UpdateAuctionSessionRequest {
    pub fn into_operation(self) -> ValidationResult<Operation> {
        let event_date =
            form::required("auctiondate", form::date("auctiondate", self.auctiondate.as_deref())?)?;
        let time = form::required("time", form::text(self.time.as_deref()))?;
        let address = form::required("address", form::text(self.address.as_deref()))?;

        let mut set = Vec::new();
        if let Some(v) = form::number("employeeId", self.employee_id.as_ref())? {
            set.push(Field::new("employeeID", v));
        }
        if let Some(v) = form::number("phoneNumber", self.phone_number.as_ref())? {
            set.push(Field::new("phoneNumber", v));
        }
        if let Some(v) = form::number("totalAttendees", self.total_attendees.as_ref())? {
            set.push(Field::new("totalAttendees", v));
        }
        if let Some(v) = form::number("numItems", self.num_items.as_ref())? {
            set.push(Field::new("numItems", v));
        }
        if let Some(v) = form::number("commissionPercent", self.commission_percent.as_ref())? {
            set.push(Field::new("commissionPercent", v));
        }

        Ok(Operation::Update(UpdateRequest {
            entity: Entity::AuctionSession,
            set,
            key: vec![
                Field::new("event_date", BindValue::Date(event_date)),
                Field::new("time", time),
                Field::new("address", address),
            ],
        }))
    }
}
