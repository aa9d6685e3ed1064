//! GAVEL Core - Query Builder and Tabular Types
//!
//! Entity catalogue, bind values, the dynamic query builder and the tabular
//! response shapes. No I/O: everything here is pure and testable without a
//! database.

pub mod builder;
pub mod entity;
pub mod error;
pub mod filter;
pub mod report;
pub mod schema;
pub mod tabular;
pub mod value;

pub use builder::{
    BoundStatement, DeleteRequest, Field, InsertRequest, Operation, OperationKind,
    ProjectionRequest, SelectRequest, UpdateRequest,
};
pub use entity::{quote_ident, Column, ColumnType, Entity};
pub use error::{ValidationError, ValidationResult};
pub use filter::{Clause, Comparison, Connective, Filter, Predicate};
pub use report::Report;
pub use tabular::{
    project_rows, Cell, NamedCell, ProjectedRow, ProjectedValue, ProjectionResponse, Row,
    TabularResponse, NOT_AVAILABLE,
};
pub use value::BindValue;
