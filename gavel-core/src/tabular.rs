//! Tabular Response Mapper
//!
//! Shapes row counts and row sets into the response envelope sent to
//! clients. Plain selects stay positional (with the entity's fixed column
//! order as a header); projections pair every cell with the column name the
//! caller asked for.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

/// Marker used for projected cells with no value.
pub const NOT_AVAILABLE: &str = "N/A";

// ============================================================================
// CELLS AND ROWS
// ============================================================================

/// One scalar read back from the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// Serialized as `YYYY-MM-DD`.
    Date(NaiveDate),
    Text(String),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

/// Ordered cells of one result row.
pub type Row = Vec<Cell>;

/// Projected cell value; null or absent cells become [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectedValue {
    Value(Cell),
    NotAvailable,
}

impl Serialize for ProjectedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ProjectedValue::Value(cell) => cell.serialize(serializer),
            ProjectedValue::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// A cell labelled with the requested column name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedCell {
    pub column: String,
    pub value: ProjectedValue,
}

/// Ordered named cells of one projected row.
pub type ProjectedRow = Vec<NamedCell>;

/// Pair each row's cells with `columns` by position.
///
/// Rows shorter than `columns` get [`ProjectedValue::NotAvailable`] for the
/// missing positions; extra trailing cells are dropped.
pub fn project_rows(columns: &[String], rows: Vec<Row>) -> Vec<ProjectedRow> {
    rows.into_iter()
        .map(|row| {
            let mut cells = row.into_iter();
            columns
                .iter()
                .map(|column| {
                    let value = match cells.next() {
                        Some(cell) if !cell.is_null() => ProjectedValue::Value(cell),
                        _ => ProjectedValue::NotAvailable,
                    };
                    NamedCell {
                        column: column.clone(),
                        value,
                    }
                })
                .collect()
        })
        .collect()
}

// ============================================================================
// RESPONSE ENVELOPES
// ============================================================================

/// Success envelope for reads and mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TabularResponse {
    pub success: bool,
    /// Column names for positional rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Vec<Vec<Object>>>))]
    pub data: Option<Vec<Row>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_affected: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TabularResponse {
    /// Bare success with no payload.
    pub fn ok() -> Self {
        Self {
            success: true,
            columns: None,
            data: None,
            rows_affected: None,
            message: None,
        }
    }

    /// Positional rows.
    pub fn rows(rows: Vec<Row>) -> Self {
        Self {
            data: Some(rows),
            ..Self::ok()
        }
    }

    /// Result of a mutating statement.
    pub fn affected(rows_affected: u64) -> Self {
        Self {
            success: rows_affected > 0,
            rows_affected: Some(rows_affected),
            ..Self::ok()
        }
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Success envelope for projections.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProjectionResponse {
    pub success: bool,
    pub columns: Vec<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<Vec<Object>>))]
    pub data: Vec<ProjectedRow>,
}

impl ProjectionResponse {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let data = project_rows(&columns, rows);
        Self {
            success: true,
            columns,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_serialization() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).map(Cell::Date);
        let row = vec![
            Cell::Int(1),
            Cell::Text("Lamp".into()),
            Cell::Null,
            Cell::Float(2.5),
        ];
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!([1, "Lamp", null, 2.5])
        );
        assert_eq!(serde_json::to_value(date).unwrap(), json!("2024-02-29"));
    }

    #[test]
    fn test_projection_pairs_columns_in_order() {
        let columns = vec!["AuctioneerName".to_string(), "HourlyWage".to_string()];
        let rows = vec![vec![Cell::Text("Ada".into()), Cell::Float(31.5)]];
        let projected = project_rows(&columns, rows);

        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].len(), 2);
        assert_eq!(projected[0][0].column, "AuctioneerName");
        assert_eq!(projected[0][1].column, "HourlyWage");
        assert_eq!(projected[0][1].value, ProjectedValue::Value(Cell::Float(31.5)));
    }

    #[test]
    fn test_projection_marks_missing_and_null() {
        let columns = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let rows = vec![vec![Cell::Null, Cell::Int(2)]];
        let response = ProjectionResponse::new(columns, rows);

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": true,
                "columns": ["a", "b", "c"],
                "data": [[
                    {"column": "a", "value": "N/A"},
                    {"column": "b", "value": 2},
                    {"column": "c", "value": "N/A"}
                ]]
            })
        );
    }

    #[test]
    fn test_affected_envelope() {
        let json = serde_json::to_value(TabularResponse::affected(1)).unwrap();
        assert_eq!(json, json!({"success": true, "rowsAffected": 1}));

        assert!(!TabularResponse::affected(0).success);
    }

    #[test]
    fn test_rows_envelope_with_columns() {
        let response = TabularResponse::rows(vec![vec![Cell::Text("ABC123".into())]])
            .with_columns(["licensePlate"]);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            json!({"success": true, "columns": ["licensePlate"], "data": [["ABC123"]]})
        );
    }
}
