//! Item-related API types

use gavel_core::{
    BindValue, DeleteRequest, Entity, Field, InsertRequest, Operation, ValidationResult,
};
use serde::{Deserialize, Serialize};

use super::form::{self, FormValue};

/// Request to register an item for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateItemRequest {
    /// Item ID
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub id: Option<FormValue<i32>>,
    /// Item category
    #[serde(default)]
    pub category: Option<String>,
    /// First day the item is available (YYYY-MM-DD)
    #[serde(default)]
    pub date: Option<String>,
    /// Seller's credit card number
    #[cfg_attr(feature = "openapi", schema(value_type = i64))]
    pub cc: Option<FormValue<i64>>,
}

impl CreateItemRequest {
    pub fn into_operation(self) -> ValidationResult<Operation> {
        let id = form::required("id", form::number("id", self.id.as_ref())?)?;
        let cc = form::required("cc", form::number("cc", self.cc.as_ref())?)?;
        let category = form::text(self.category.as_deref());
        let date = form::date("date", self.date.as_deref())?;

        Ok(Operation::Insert(InsertRequest {
            entity: Entity::Item,
            values: vec![
                BindValue::Int(id),
                BindValue::from(category),
                BindValue::from(date),
                BindValue::BigInt(cc),
            ],
        }))
    }
}

/// Delete an item by its ID.
pub fn delete_item(item_id: i32) -> Operation {
    Operation::Delete(DeleteRequest {
        entity: Entity::Item,
        key: vec![Field::new("itemID", item_id)],
    })
}
