//! Driver row decoding
//!
//! Turns `tokio_postgres` rows into positional [`Row`]s by each column's
//! declared type.

use gavel_core::{Cell, Row};
use tokio_postgres::types::Type;

use crate::error::{ApiError, ApiResult};

/// How a result column is read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    SmallInt,
    Int,
    BigInt,
    Real,
    Double,
    Text,
    Date,
    Bool,
}

impl CellKind {
    /// Decoder for a declared column type, if supported.
    pub fn for_type(ty: &Type) -> Option<Self> {
        let kind = if *ty == Type::INT2 {
            CellKind::SmallInt
        } else if *ty == Type::INT4 {
            CellKind::Int
        } else if *ty == Type::INT8 {
            CellKind::BigInt
        } else if *ty == Type::FLOAT4 {
            CellKind::Real
        } else if *ty == Type::FLOAT8 {
            CellKind::Double
        } else if *ty == Type::TEXT
            || *ty == Type::VARCHAR
            || *ty == Type::BPCHAR
            || *ty == Type::NAME
        {
            CellKind::Text
        } else if *ty == Type::DATE {
            CellKind::Date
        } else if *ty == Type::BOOL {
            CellKind::Bool
        } else {
            return None;
        };
        Some(kind)
    }
}

/// Decode every column of a driver row, in select-list order.
pub fn decode_row(row: &tokio_postgres::Row) -> ApiResult<Row> {
    (0..row.len()).map(|idx| decode_cell(row, idx)).collect()
}

fn decode_cell(row: &tokio_postgres::Row, idx: usize) -> ApiResult<Cell> {
    let column = &row.columns()[idx];
    let kind = CellKind::for_type(column.type_()).ok_or_else(|| {
        ApiError::database_error(format!(
            "Unsupported column type {} for column {}",
            column.type_(),
            column.name()
        ))
    })?;

    let cell = match kind {
        CellKind::SmallInt => row
            .try_get::<_, Option<i16>>(idx)?
            .map(|v| Cell::Int(i64::from(v))),
        CellKind::Int => row
            .try_get::<_, Option<i32>>(idx)?
            .map(|v| Cell::Int(i64::from(v))),
        CellKind::BigInt => row.try_get::<_, Option<i64>>(idx)?.map(Cell::Int),
        CellKind::Real => row
            .try_get::<_, Option<f32>>(idx)?
            .map(|v| Cell::Float(f64::from(v))),
        CellKind::Double => row.try_get::<_, Option<f64>>(idx)?.map(Cell::Float),
        CellKind::Text => row.try_get::<_, Option<String>>(idx)?.map(Cell::Text),
        CellKind::Date => row
            .try_get::<_, Option<chrono::NaiveDate>>(idx)?
            .map(Cell::Date),
        CellKind::Bool => row.try_get::<_, Option<bool>>(idx)?.map(Cell::Bool),
    };
    Ok(cell.unwrap_or(Cell::Null))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_types() {
        assert_eq!(CellKind::for_type(&Type::INT4), Some(CellKind::Int));
        assert_eq!(CellKind::for_type(&Type::INT8), Some(CellKind::BigInt));
        assert_eq!(CellKind::for_type(&Type::FLOAT8), Some(CellKind::Double));
        assert_eq!(CellKind::for_type(&Type::VARCHAR), Some(CellKind::Text));
        assert_eq!(CellKind::for_type(&Type::BPCHAR), Some(CellKind::Text));
        assert_eq!(CellKind::for_type(&Type::DATE), Some(CellKind::Date));
        assert_eq!(CellKind::for_type(&Type::BOOL), Some(CellKind::Bool));
    }

    #[test]
    fn test_unsupported_types() {
        assert_eq!(CellKind::for_type(&Type::NUMERIC), None);
        assert_eq!(CellKind::for_type(&Type::JSONB), None);
        assert_eq!(CellKind::for_type(&Type::BYTEA), None);
    }
}
