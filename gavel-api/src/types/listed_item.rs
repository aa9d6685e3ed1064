//! Listed-item API types

use gavel_core::{BindValue, Entity, InsertRequest, Operation, ValidationResult};
use serde::{Deserialize, Serialize};

use super::form::{self, FormValue};

/// Request to list an item at an auction session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateListedItemRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub id: Option<FormValue<i32>>,
    /// Session date (YYYY-MM-DD)
    #[serde(default)]
    pub listdate: Option<String>,
    /// Session time slot
    #[serde(default)]
    pub time: Option<String>,
    /// Session address
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "sPrice")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i32>))]
    pub start_price: Option<FormValue<i32>>,
    #[serde(rename = "fPrice")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i32>))]
    pub final_price: Option<FormValue<i32>>,
    /// Winning bidder's credit card number
    #[cfg_attr(feature = "openapi", schema(value_type = i64))]
    pub cc: Option<FormValue<i64>>,
    #[serde(default)]
    pub condition: Option<String>,
}

impl CreateListedItemRequest {
    pub fn into_operation(self) -> ValidationResult<Operation> {
        let id = form::required("id", form::number("id", self.id.as_ref())?)?;
        let listdate =
            form::required("listdate", form::date("listdate", self.listdate.as_deref())?)?;
        let time = form::required("time", form::text(self.time.as_deref()))?;
        let address = form::required("address", form::text(self.address.as_deref()))?;
        let cc = form::required("cc", form::number("cc", self.cc.as_ref())?)?;
        let start_price = form::number("sPrice", self.start_price.as_ref())?;
        let final_price = form::number("fPrice", self.final_price.as_ref())?;
        let condition = form::text(self.condition.as_deref());

        Ok(Operation::Insert(InsertRequest {
            entity: Entity::ListedItem,
            values: vec![
                BindValue::Int(id),
                BindValue::Date(listdate),
                BindValue::Text(time),
                BindValue::Text(address),
                BindValue::BigInt(cc),
                BindValue::from(start_price),
                BindValue::from(final_price),
                BindValue::from(condition),
            ],
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gavel_core::ValidationError;

    #[test]
    fn test_prices_bind_to_price_columns() {
        let req: CreateListedItemRequest = serde_json::from_str(
            r#"{"id":1,"listdate":"2024-05-04","time":"10:00","address":"1 Main St",
                "sPrice":"100","fPrice":"250","cc":"4111","condition":"Good"}"#,
        )
        .unwrap();
        let stmt = req.into_operation().unwrap().build().unwrap();

        assert!(stmt.sql().starts_with(
            "INSERT INTO \"ForSaleItems_ListedAt_Wins\" (\"itemID\", \"listed_date\", \"time\", \"address\", \"creditCardNumber\", \"startPrice\""
        ));
        assert_eq!(stmt.params()[4], BindValue::BigInt(4111));
        assert_eq!(stmt.params()[5], BindValue::Int(100));
        assert_eq!(stmt.params()[6], BindValue::Int(250));
        assert_eq!(stmt.params()[7], BindValue::from("Good"));
    }

    #[test]
    fn test_session_key_is_required() {
        let req: CreateListedItemRequest =
            serde_json::from_str(r#"{"id":1,"listdate":"2024-05-04","cc":4111}"#).unwrap();
        assert_eq!(req.into_operation(), Err(ValidationError::missing("time")));
    }
}
