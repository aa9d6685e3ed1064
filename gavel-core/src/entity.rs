//! Entity catalogue
//!
//! Every table the service touches is described here with its columns in a
//! fixed order. That order is the positional contract for plain selects, and
//! the column list doubles as the allow-list for caller-supplied identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::value::BindValue;

// ============================================================================
// COLUMN TYPES
// ============================================================================

/// SQL type of a catalogued column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// INTEGER
    Int,
    /// BIGINT
    BigInt,
    /// DOUBLE PRECISION
    Float,
    /// VARCHAR
    Text,
    /// DATE
    Date,
}

impl ColumnType {
    /// DDL spelling of this type.
    pub fn sql_name(&self) -> &'static str {
        match self {
            ColumnType::Int => "INTEGER",
            ColumnType::BigInt => "BIGINT",
            ColumnType::Float => "DOUBLE PRECISION",
            ColumnType::Text => "VARCHAR(255)",
            ColumnType::Date => "DATE",
        }
    }

    /// Convert a bind value into the representation this column accepts.
    ///
    /// Integers widen to BIGINT and DOUBLE PRECISION; a BIGINT narrows to
    /// INTEGER only when it fits. Nulls become typed nulls so the driver can
    /// encode them. Returns `None` when the value cannot be stored here.
    pub fn coerce(&self, value: BindValue) -> Option<BindValue> {
        match (self, value) {
            (ty, BindValue::Null) | (ty, BindValue::NullOf(_)) => Some(BindValue::NullOf(*ty)),
            (ColumnType::Int, BindValue::Int(v)) => Some(BindValue::Int(v)),
            (ColumnType::Int, BindValue::BigInt(v)) => i32::try_from(v).ok().map(BindValue::Int),
            (ColumnType::BigInt, BindValue::Int(v)) => Some(BindValue::BigInt(i64::from(v))),
            (ColumnType::BigInt, BindValue::BigInt(v)) => Some(BindValue::BigInt(v)),
            (ColumnType::Float, BindValue::Int(v)) => Some(BindValue::Float(f64::from(v))),
            (ColumnType::Float, BindValue::Float(v)) => Some(BindValue::Float(v)),
            (ColumnType::Text, BindValue::Text(v)) => Some(BindValue::Text(v)),
            (ColumnType::Date, BindValue::Date(v)) => Some(BindValue::Date(v)),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int => "integer",
            ColumnType::BigInt => "bigint",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
            ColumnType::Date => "date",
        };
        f.write_str(name)
    }
}

/// A catalogued column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub nullable: bool,
}

impl Column {
    const fn required(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            nullable: false,
        }
    }

    const fn optional(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            nullable: true,
        }
    }

    /// Quoted identifier for use in statement text.
    pub fn ident(&self) -> String {
        quote_ident(self.name)
    }

    /// Coerce `value` for this column or fail with a type mismatch.
    ///
    /// NaN and infinities are refused: the database would store them and the
    /// response mapper would read them back as null.
    pub fn bind(&self, value: BindValue) -> ValidationResult<BindValue> {
        if let BindValue::Float(v) = value {
            if !v.is_finite() {
                let reason = format!("'{}' is not a finite number", v);
                return Err(ValidationError::invalid(self.name, reason));
            }
        }
        self.ty
            .coerce(value)
            .ok_or_else(|| ValidationError::TypeMismatch {
                column: self.name.to_string(),
                expected: self.ty,
            })
    }
}

/// Double-quote a catalogued identifier.
///
/// Only ever called with names from this module, so no escaping is needed.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name)
}

// ============================================================================
// COLUMN LISTS
// ============================================================================

use ColumnType::{BigInt, Date, Float, Int, Text};

const CUSTOMER_COLUMNS: &[Column] = &[
    Column::required("creditCardNumber", BigInt),
    Column::optional("customerName", Text),
];

const ITEM_COLUMNS: &[Column] = &[
    Column::required("itemID", Int),
    Column::optional("category", Text),
    Column::optional("startDate", Date),
    Column::required("creditCardNumber", BigInt),
];

const LISTED_ITEM_COLUMNS: &[Column] = &[
    Column::required("itemID", Int),
    Column::required("listed_date", Date),
    Column::required("time", Text),
    Column::required("address", Text),
    Column::required("creditCardNumber", BigInt),
    Column::optional("startPrice", Int),
    Column::optional("finalPrice", Int),
    Column::optional("condition", Text),
];

const AUCTION_SESSION_COLUMNS: &[Column] = &[
    Column::required("event_date", Date),
    Column::required("time", Text),
    Column::required("address", Text),
    Column::optional("employeeID", Int),
    Column::optional("phoneNumber", BigInt),
    Column::optional("totalAttendees", Int),
    Column::optional("numItems", Int),
    Column::optional("commissionPercent", Float),
];

const AUCTIONEER_COLUMNS: &[Column] = &[
    Column::required("employeeID", Int),
    Column::optional("startDate", Date),
    Column::optional("hourlyWage", Float),
    Column::optional("auctioneerName", Text),
];

const APPRAISER_COLUMNS: &[Column] = &[
    Column::required("appraiserID", Int),
    Column::optional("appraiserName", Text),
];

const APPRAISAL_COLUMNS: &[Column] = &[
    Column::required("appraiserID", Int),
    Column::required("itemID", Int),
];

const BID_COLUMNS: &[Column] = &[
    Column::required("bidID", Int),
    Column::required("itemID", Int),
    Column::required("creditCardNumber", BigInt),
    Column::required("amount", Int),
];

const DELIVERY_VEHICLE_COLUMNS: &[Column] = &[
    Column::required("licensePlate", Text),
    Column::optional("payloadCapacity", Int),
    Column::optional("makeModel", Text),
];

const STORAGE_FACILITY_COLUMNS: &[Column] = &[Column::required("address", Text)];

const COLLECTION_COLUMNS: &[Column] = &[
    Column::required("licensePlate", Text),
    Column::required("address", Text),
];

// ============================================================================
// ENTITY
// ============================================================================

/// Tables exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Customer,
    Item,
    ListedItem,
    AuctionSession,
    Auctioneer,
    Appraiser,
    Appraisal,
    Bid,
    DeliveryVehicle,
    StorageFacility,
    Collection,
}

impl Entity {
    /// All entities, parents before children.
    pub const ALL: [Entity; 11] = [
        Entity::Customer,
        Entity::StorageFacility,
        Entity::DeliveryVehicle,
        Entity::Collection,
        Entity::Auctioneer,
        Entity::AuctionSession,
        Entity::Item,
        Entity::ListedItem,
        Entity::Appraiser,
        Entity::Appraisal,
        Entity::Bid,
    ];

    /// Table name as created in the database.
    pub fn table(&self) -> &'static str {
        match self {
            Entity::Customer => "Customers",
            Entity::Item => "Items_Sells",
            Entity::ListedItem => "ForSaleItems_ListedAt_Wins",
            Entity::AuctionSession => "AuctionSession_Operates",
            Entity::Auctioneer => "Auctioneer",
            Entity::Appraiser => "Appraiser",
            Entity::Appraisal => "Appraises",
            Entity::Bid => "Bids_Receive_Places",
            Entity::DeliveryVehicle => "DeliveryVehicle",
            Entity::StorageFacility => "StorageFacility",
            Entity::Collection => "CollectsFrom",
        }
    }

    /// Quoted table identifier.
    pub fn table_ident(&self) -> String {
        quote_ident(self.table())
    }

    /// Columns in their documented fixed order.
    pub fn columns(&self) -> &'static [Column] {
        match self {
            Entity::Customer => CUSTOMER_COLUMNS,
            Entity::Item => ITEM_COLUMNS,
            Entity::ListedItem => LISTED_ITEM_COLUMNS,
            Entity::AuctionSession => AUCTION_SESSION_COLUMNS,
            Entity::Auctioneer => AUCTIONEER_COLUMNS,
            Entity::Appraiser => APPRAISER_COLUMNS,
            Entity::Appraisal => APPRAISAL_COLUMNS,
            Entity::Bid => BID_COLUMNS,
            Entity::DeliveryVehicle => DELIVERY_VEHICLE_COLUMNS,
            Entity::StorageFacility => STORAGE_FACILITY_COLUMNS,
            Entity::Collection => COLLECTION_COLUMNS,
        }
    }

    /// Primary key column names.
    pub fn key(&self) -> &'static [&'static str] {
        match self {
            Entity::Customer => &["creditCardNumber"],
            Entity::Item | Entity::ListedItem => &["itemID"],
            Entity::AuctionSession => &["event_date", "time", "address"],
            Entity::Auctioneer => &["employeeID"],
            Entity::Appraiser => &["appraiserID"],
            Entity::Appraisal => &["appraiserID", "itemID"],
            Entity::Bid => &["bidID"],
            Entity::DeliveryVehicle => &["licensePlate"],
            Entity::StorageFacility => &["address"],
            Entity::Collection => &["licensePlate", "address"],
        }
    }

    /// Column names in fixed order, for response headers.
    pub fn column_names(&self) -> Vec<String> {
        self.columns().iter().map(|c| c.name.to_string()).collect()
    }

    /// Look up a column by name, ignoring ASCII case.
    pub fn column(&self, name: &str) -> Option<&'static Column> {
        let name = name.trim();
        self.columns()
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Look up a column or fail with `UnknownColumn`.
    pub fn resolve(&self, name: &str) -> ValidationResult<&'static Column> {
        self.column(name).ok_or_else(|| ValidationError::UnknownColumn {
            table: self.table().to_string(),
            column: name.to_string(),
        })
    }

    /// Whether `name` is one of this entity's key columns.
    pub fn is_key(&self, name: &str) -> bool {
        self.key().iter().any(|k| k.eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}
