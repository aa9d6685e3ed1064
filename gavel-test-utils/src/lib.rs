//! GAVEL Test Utilities
//!
//! Shared test infrastructure for the GAVEL workspace:
//! - Proptest generators for catalogue types and bind values
//! - Fixtures for the common request scenarios
//! - Assertions over bound statements

pub use gavel_core::{
    BindValue, BoundStatement, ColumnType, Comparison, Connective, Entity, Filter, InsertRequest,
    Operation, Predicate, SelectRequest, ValidationError,
};

use chrono::NaiveDate;

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for catalogue types and request inputs.

    use super::*;
    use proptest::prelude::*;

    /// Any catalogued entity.
    pub fn arb_entity() -> impl Strategy<Value = Entity> {
        proptest::sample::select(Entity::ALL.to_vec())
    }

    pub fn arb_comparison() -> impl Strategy<Value = Comparison> {
        prop_oneof![
            Just(Comparison::Eq),
            Just(Comparison::Lt),
            Just(Comparison::Lte),
            Just(Comparison::Gt),
            Just(Comparison::Gte),
        ]
    }

    pub fn arb_connective() -> impl Strategy<Value = Connective> {
        prop_oneof![Just(Connective::And), Just(Connective::Or)]
    }

    /// Operator tokens the web client is allowed to send, in any case.
    pub fn arb_operator_token() -> impl Strategy<Value = String> {
        let tokens = vec![
            "=", "<", "<=", ">", ">=", "eq", "lessThan", "lessThanOrEqual", "greaterThan",
            "greaterThanOrEqual",
        ];
        (proptest::sample::select(tokens), any::<bool>()).prop_map(|(token, upper)| {
            if upper {
                token.to_uppercase()
            } else {
                token.to_string()
            }
        })
    }

    /// Tokens that are neither an operator nor a connective.
    pub fn arb_unknown_token() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("!=".to_string()),
            Just("<>".to_string()),
            Just("LIKE".to_string()),
            Just("1=1 OR".to_string()),
            "[a-z]{3,12}; DROP TABLE [A-Za-z_]{1,20}",
            "[#%&*]{1,4}",
        ]
        .prop_filter("must not parse", |token| {
            Comparison::parse(token).is_err() && Connective::parse(token).is_err()
        })
    }

    /// Identifiers that are not a column of `entity`.
    pub fn arb_unknown_column(entity: Entity) -> impl Strategy<Value = String> {
        "[A-Za-z_ ()=;']{1,24}".prop_filter("must not name a column", move |name| {
            entity.column(name).is_none()
        })
    }

    /// A calendar day between 2000 and 2035.
    pub fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (2000i32..2035, 1u32..=12, 1u32..=28).prop_filter_map("valid date", |(y, m, d)| {
            NaiveDate::from_ymd_opt(y, m, d)
        })
    }

    /// A non-null bind value storable in a column of type `ty`.
    pub fn arb_bind_value(ty: ColumnType) -> BoxedStrategy<BindValue> {
        match ty {
            ColumnType::Int => any::<i32>().prop_map(BindValue::Int).boxed(),
            ColumnType::BigInt => any::<i64>().prop_map(BindValue::BigInt).boxed(),
            ColumnType::Float => (-1.0e6f64..1.0e6).prop_map(BindValue::Float).boxed(),
            ColumnType::Text => "[A-Za-z0-9 '\";-]{0,32}".prop_map(BindValue::Text).boxed(),
            ColumnType::Date => arb_date().prop_map(BindValue::Date).boxed(),
        }
    }

    /// A full row of values for `entity`, in its fixed column order.
    pub fn arb_row_values(entity: Entity) -> impl Strategy<Value = Vec<BindValue>> {
        entity
            .columns()
            .iter()
            .map(|c| arb_bind_value(c.ty))
            .collect::<Vec<_>>()
    }

    /// An insert request with valid values for `entity`.
    pub fn arb_insert(entity: Entity) -> impl Strategy<Value = InsertRequest> {
        arb_row_values(entity).prop_map(move |values| InsertRequest { entity, values })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built requests and rows for the common scenarios.

    use super::*;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
    }

    /// Insert of item 1 sold by card 4111.
    pub fn item_insert(item_id: i32) -> InsertRequest {
        InsertRequest {
            entity: Entity::Item,
            values: vec![
                BindValue::Int(item_id),
                BindValue::from("Furniture"),
                BindValue::Date(date(2024, 3, 1)),
                BindValue::BigInt(4111_1111_1111_1111),
            ],
        }
    }

    /// Customer owning the card used by [`item_insert`].
    pub fn customer_insert() -> InsertRequest {
        InsertRequest {
            entity: Entity::Customer,
            values: vec![
                BindValue::BigInt(4111_1111_1111_1111),
                BindValue::from("Ada Lovelace"),
            ],
        }
    }

    /// Plate, payload and make filter joined by AND.
    pub fn vehicle_filter() -> Filter {
        Filter::new()
            .and(Predicate::eq("licensePlate", "ABC123"))
            .and(Predicate::new("payloadCapacity", Comparison::Lt, 500))
            .and(Predicate::eq("makeModel", "Volvo"))
    }

    /// The web client's body for [`vehicle_filter`].
    pub fn vehicle_search_body() -> serde_json::Value {
        serde_json::json!({
            "plate": "ABC123",
            "connective": "AND",
            "comparisonOperator": "<",
            "payload": 500,
            "make": "Volvo"
        })
    }

}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions over bound statements.

    use super::*;

    /// Assert that every `$n` placeholder has a matching parameter.
    #[track_caller]
    pub fn assert_placeholders_bound(stmt: &BoundStatement) {
        let placeholders = stmt.sql().matches('$').count();
        assert_eq!(
            placeholders,
            stmt.params().len(),
            "placeholder count differs from parameter count in: {}",
            stmt.sql()
        );
        for n in 1..=stmt.params().len() {
            assert!(
                stmt.sql().contains(&format!("${}", n)),
                "missing placeholder ${} in: {}",
                n,
                stmt.sql()
            );
        }
    }

    /// Assert that no text bind value leaked into the statement text.
    #[track_caller]
    pub fn assert_no_text_inlined(stmt: &BoundStatement) {
        for param in stmt.params() {
            if let BindValue::Text(text) = param {
                if text.len() >= 3 {
                    assert!(
                        !stmt.sql().contains(text.as_str()),
                        "bind value {:?} appears in statement text: {}",
                        text,
                        stmt.sql()
                    );
                }
            }
        }
    }

}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_item_fixture_builds() {
        let stmt = Operation::Insert(fixtures::item_insert(1)).build().unwrap();
        assertions::assert_placeholders_bound(&stmt);
    }

    #[test]
    fn test_vehicle_fixture_builds() {
        let stmt = Operation::Select(SelectRequest::filtered(
            Entity::DeliveryVehicle,
            fixtures::vehicle_filter(),
        ))
        .build()
        .unwrap();
        assert_eq!(stmt.params().len(), 3);
        assertions::assert_no_text_inlined(&stmt);
    }

    proptest! {
        #[test]
        fn prop_generated_inserts_bind_cleanly(req in generators::arb_entity().prop_flat_map(generators::arb_insert)) {
            let stmt = Operation::Insert(req).build();
            prop_assert!(stmt.is_ok());
        }

        #[test]
        fn prop_unknown_tokens_never_parse(token in generators::arb_unknown_token()) {
            prop_assert!(Comparison::parse(&token).is_err());
            prop_assert!(Connective::parse(&token).is_err());
        }
    }
}
