//! Property-Based Tests for the Query Builder
//!
//! - Statement text depends only on the request shape, never on bind values.
//! - Operator and connective tokens outside the closed sets are rejected.
//! - Identifiers outside an entity's column list never reach statement text.

use gavel_core::{
    BindValue, Comparison, Connective, DeleteRequest, Entity, Field, Filter, Operation, Predicate,
    ProjectionRequest, SelectRequest, UpdateRequest, ValidationError,
};
use gavel_test_utils::{assertions, generators};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Payload filter shape: which predicates are present and how they are joined.
type VehicleShape = (bool, bool, bool, Connective, Connective, Comparison);

fn vehicle_shape() -> impl Strategy<Value = VehicleShape> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        generators::arb_connective(),
        generators::arb_connective(),
        generators::arb_comparison(),
    )
}

fn vehicle_filter(
    (plate, payload, make, first, second, comparison): VehicleShape,
    plate_value: String,
    payload_value: i32,
    make_value: String,
) -> Filter {
    let mut filter = Filter::new();
    if plate {
        filter.push(Connective::And, Predicate::eq("licensePlate", plate_value));
    }
    if payload {
        filter.push(
            first,
            Predicate::new("payloadCapacity", comparison, payload_value),
        );
    }
    if make {
        filter.push(second, Predicate::eq("makeModel", make_value));
    }
    filter
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_insert_template_is_value_independent(
        (a, b) in generators::arb_entity().prop_flat_map(|e| (generators::arb_insert(e), generators::arb_insert(e)))
    ) {
        let first = Operation::Insert(a).build();
        let second = Operation::Insert(b).build();
        prop_assert!(first.is_ok() && second.is_ok());
        if let (Ok(first), Ok(second)) = (first, second) {
            prop_assert_eq!(first.sql(), second.sql());
            assertions::assert_placeholders_bound(&first);
        }
    }

    #[test]
    fn prop_update_template_is_value_independent(
        attendees in any::<i32>(),
        commission in -100.0f64..100.0,
        date in generators::arb_date(),
        address in "[A-Za-z0-9 ']{1,30}",
    ) {
        let build = |attendees: i32, commission: f64, address: String| {
            Operation::Update(UpdateRequest {
                entity: Entity::AuctionSession,
                set: vec![
                    Field::new("totalAttendees", attendees),
                    Field::new("commissionPercent", commission),
                ],
                key: vec![
                    Field::new("event_date", date),
                    Field::new("time", "10:00"),
                    Field::new("address", address),
                ],
            })
            .build()
        };

        let a = build(attendees, commission, address.clone());
        let b = build(0, 0.0, "elsewhere".to_string());
        prop_assert!(a.is_ok() && b.is_ok());
        if let (Ok(a), Ok(b)) = (a, b) {
            prop_assert_eq!(a.sql(), b.sql());
            prop_assert_eq!(&a.params()[4], &BindValue::Text(address));
        }
    }

    #[test]
    fn prop_delete_template_is_value_independent(x in any::<i32>(), y in any::<i32>()) {
        let build = |id: i32| Operation::Delete(DeleteRequest {
            entity: Entity::Item,
            key: vec![Field::new("itemID", id)],
        }).build();
        let (a, b) = (build(x), build(y));
        prop_assert!(a.is_ok() && b.is_ok());
        if let (Ok(a), Ok(b)) = (a, b) {
            prop_assert_eq!(a.sql(), b.sql());
        }
    }

    #[test]
    fn prop_filtered_select_binds_every_value(
        shape in vehicle_shape(),
        plate in "[A-Z0-9' ;-]{1,10}",
        payload in any::<i32>(),
        make in "[A-Za-z' ;-]{1,12}",
    ) {
        let present = [shape.0, shape.1, shape.2].iter().filter(|p| **p).count();
        let filter = vehicle_filter(shape, plate.clone(), payload, make.clone());
        let stmt =
            Operation::Select(SelectRequest::filtered(Entity::DeliveryVehicle, filter)).build();
        prop_assert!(stmt.is_ok());
        if let Ok(stmt) = stmt {
            prop_assert_eq!(stmt.params().len(), present);
            assertions::assert_placeholders_bound(&stmt);
            prop_assert_eq!(stmt.sql().contains(" WHERE "), present > 0);

            let template = vehicle_filter(shape, "x".into(), 0, "y".into());
            let other =
                Operation::Select(SelectRequest::filtered(Entity::DeliveryVehicle, template)).build();
            prop_assert_eq!(other.map(|s| s.sql().to_string()).ok(), Some(stmt.sql().to_string()));
        }
    }

    #[test]
    fn prop_unknown_operator_is_rejected(token in generators::arb_unknown_token()) {
        prop_assert_eq!(
            Comparison::parse(&token),
            Err(ValidationError::UnknownOperator { token: token.clone() })
        );
    }

    #[test]
    fn prop_unknown_connective_is_rejected(token in generators::arb_unknown_token()) {
        let is_unknown_connective = matches!(
            Connective::parse(&token),
            Err(ValidationError::UnknownConnective { .. })
        );
        prop_assert!(is_unknown_connective);
    }

    #[test]
    fn prop_word_and_symbol_operators_parse(token in generators::arb_operator_token()) {
        prop_assert!(Comparison::parse(&token).is_ok());
    }

    #[test]
    fn prop_projection_rejects_unknown_columns(
        name in generators::arb_unknown_column(Entity::Auctioneer),
        keep_valid in any::<bool>(),
    ) {
        let mut columns = Vec::new();
        if keep_valid {
            columns.push("auctioneerName".to_string());
        }
        columns.push(name);
        let result = Operation::Projection(ProjectionRequest {
            entity: Entity::Auctioneer,
            columns,
        })
        .build();
        let is_unknown_column = matches!(result, Err(ValidationError::UnknownColumn { .. }));
        prop_assert!(is_unknown_column);
    }

    #[test]
    fn prop_filter_rejects_unknown_columns(
        name in generators::arb_unknown_column(Entity::DeliveryVehicle),
        value in "[a-z]{1,8}",
    ) {
        let filter = Filter::new().and(Predicate::eq(name, value));
        let result =
            Operation::Select(SelectRequest::filtered(Entity::DeliveryVehicle, filter)).build();
        let is_unknown_column = matches!(result, Err(ValidationError::UnknownColumn { .. }));
        prop_assert!(is_unknown_column);
    }

    #[test]
    fn prop_projection_preserves_requested_order(
        order in Just(vec!["employeeID", "startDate", "hourlyWage", "auctioneerName"]).prop_shuffle(),
        take in 1usize..=4,
    ) {
        let requested: Vec<String> = order.iter().take(take).map(|s| s.to_string()).collect();
        let stmt = Operation::Projection(ProjectionRequest {
            entity: Entity::Auctioneer,
            columns: requested.clone(),
        })
        .build();
        prop_assert!(stmt.is_ok());
        if let Ok(stmt) = stmt {
            let expected = requested
                .iter()
                .map(|c| format!("\"{}\"", c))
                .collect::<Vec<_>>()
                .join(", ");
            prop_assert_eq!(stmt.sql(), format!("SELECT {} FROM \"Auctioneer\"", expected));
        }
    }
}
