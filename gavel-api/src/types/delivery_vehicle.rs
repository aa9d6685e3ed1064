//! Delivery-vehicle search types

use gavel_core::{
    Comparison, Connective, Entity, Filter, Operation, Predicate, SelectRequest, ValidationError,
    ValidationResult,
};
use serde::{Deserialize, Serialize};

use super::form::{self, FormValue};

/// Filtered search over delivery vehicles.
///
/// Up to three predicates, in this order: plate equality, payload comparison,
/// make equality. Each predicate after the first is joined by its own
/// connective (`plateNload`, `loadNmake`) or, failing that, by `connective`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct VehicleSearchRequest {
    /// License plate to match exactly
    #[serde(default)]
    pub plate: Option<String>,
    /// Default connective (AND or OR)
    #[serde(default)]
    pub connective: Option<String>,
    /// Connective joining the payload predicate
    #[serde(default, rename = "plateNload")]
    pub plate_n_load: Option<String>,
    /// Payload comparison operator (`<`, `>=`, `lessThan`, ...)
    #[serde(default, rename = "comparisonOperator", alias = "loadcomp")]
    pub comparison_operator: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<i32>))]
    pub payload: Option<FormValue<i32>>,
    /// Connective joining the make predicate
    #[serde(default, rename = "loadNmake")]
    pub load_n_make: Option<String>,
    /// Make and model to match exactly
    #[serde(default)]
    pub make: Option<String>,
}

fn connective(value: Option<&str>) -> ValidationResult<Option<Connective>> {
    form::text(value).map(|t| Connective::parse(&t)).transpose()
}

/// Append `predicate`, requiring a connective unless it is the first clause.
fn append(
    filter: &mut Filter,
    connective: Option<Connective>,
    predicate: Predicate,
) -> ValidationResult<()> {
    let connective = match connective {
        Some(c) => c,
        None if filter.is_empty() => Connective::And,
        None => return Err(ValidationError::missing("connective")),
    };
    filter.push(connective, predicate);
    Ok(())
}

impl VehicleSearchRequest {
    pub fn into_operation(self) -> ValidationResult<Operation> {
        // Every supplied token is checked, used or not.
        let default_connective = connective(self.connective.as_deref())?;
        let payload_connective = connective(self.plate_n_load.as_deref())?.or(default_connective);
        let make_connective = connective(self.load_n_make.as_deref())?.or(default_connective);
        let comparison = form::text(self.comparison_operator.as_deref())
            .map(|t| Comparison::parse(&t))
            .transpose()?;

        let mut filter = Filter::new();

        if let Some(plate) = form::text(self.plate.as_deref()) {
            append(&mut filter, None, Predicate::eq("licensePlate", plate))?;
        }

        if let Some(payload) = form::number("payload", self.payload.as_ref())? {
            let comparison = form::required("comparisonOperator", comparison)?;
            append(
                &mut filter,
                payload_connective,
                Predicate::new("payloadCapacity", comparison, payload),
            )?;
        }

        if let Some(make) = form::text(self.make.as_deref()) {
            append(&mut filter, make_connective, Predicate::eq("makeModel", make))?;
        }

        Ok(Operation::Select(SelectRequest::filtered(
            Entity::DeliveryVehicle,
            filter,
        )))
    }
}
