//! Bind values
//!
//! Scalars that travel to the database as statement parameters. Nothing in
//! this module ever becomes statement text.

use chrono::NaiveDate;
use postgres_types::ToSql;

use crate::entity::ColumnType;
use crate::tabular::Cell;

/// A single statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    /// 32-bit integer (INTEGER)
    Int(i32),
    /// 64-bit integer (BIGINT)
    BigInt(i64),
    /// Double precision float
    Float(f64),
    /// Text value
    Text(String),
    /// Calendar day
    Date(NaiveDate),
    /// Null whose column type is not known yet
    Null,
    /// Null typed for a specific column, produced when binding to a column
    NullOf(ColumnType),
}

impl BindValue {
    /// Borrow this value as a driver parameter.
    pub fn as_to_sql(&self) -> &(dyn ToSql + Sync) {
        match self {
            BindValue::Int(v) => v,
            BindValue::BigInt(v) => v,
            BindValue::Float(v) => v,
            BindValue::Text(v) => v,
            BindValue::Date(v) => v,
            BindValue::NullOf(ColumnType::Int) => &None::<i32>,
            BindValue::NullOf(ColumnType::BigInt) => &None::<i64>,
            BindValue::NullOf(ColumnType::Float) => &None::<f64>,
            BindValue::NullOf(ColumnType::Date) => &None::<NaiveDate>,
            BindValue::NullOf(ColumnType::Text) | BindValue::Null => &None::<&str>,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, BindValue::Null | BindValue::NullOf(_))
    }

    /// The cell a read of this value is expected to return.
    pub fn to_cell(&self) -> Cell {
        match self {
            BindValue::Int(v) => Cell::Int(i64::from(*v)),
            BindValue::BigInt(v) => Cell::Int(*v),
            BindValue::Float(v) => Cell::Float(*v),
            BindValue::Text(v) => Cell::Text(v.clone()),
            BindValue::Date(v) => Cell::Date(*v),
            BindValue::Null | BindValue::NullOf(_) => Cell::Null,
        }
    }
}

impl From<i32> for BindValue {
    fn from(v: i32) -> Self {
        BindValue::Int(v)
    }
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        BindValue::BigInt(v)
    }
}

impl From<f64> for BindValue {
    fn from(v: f64) -> Self {
        BindValue::Float(v)
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        BindValue::Text(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Text(v.to_string())
    }
}

impl From<NaiveDate> for BindValue {
    fn from(v: NaiveDate) -> Self {
        BindValue::Date(v)
    }
}

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(BindValue::Null)
    }
}
