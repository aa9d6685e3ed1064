//! Filter expressions for filtered selects
//!
//! Operators and connectives are closed enums. Caller tokens are parsed into
//! them up front and anything unrecognised is rejected, so the only operator
//! text that can reach a statement is the fixed spelling below.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::value::BindValue;

// ============================================================================
// COMPARISON
// ============================================================================

/// Comparison operator for a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Comparison {
    /// SQL spelling of the operator.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
        }
    }

    /// Parse a caller token.
    ///
    /// Accepts the symbols and the word forms the web client sends
    /// (`lessThan`, `greaterThanOrEqual`, ...).
    pub fn parse(token: &str) -> ValidationResult<Self> {
        let trimmed = token.trim();
        let op = match trimmed {
            "=" | "==" => Comparison::Eq,
            "<" => Comparison::Lt,
            "<=" => Comparison::Lte,
            ">" => Comparison::Gt,
            ">=" => Comparison::Gte,
            _ => match trimmed.to_ascii_lowercase().as_str() {
                "eq" | "equal" | "equals" => Comparison::Eq,
                "lt" | "lessthan" => Comparison::Lt,
                "lte" | "lessthanorequal" => Comparison::Lte,
                "gt" | "greaterthan" => Comparison::Gt,
                "gte" | "greaterthanorequal" => Comparison::Gte,
                _ => {
                    return Err(ValidationError::UnknownOperator {
                        token: token.to_string(),
                    })
                }
            },
        };
        Ok(op)
    }
}

impl FromStr for Comparison {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Comparison::parse(s)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

// ============================================================================
// CONNECTIVE
// ============================================================================

/// Boolean connective between two predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Connective::And => "AND",
            Connective::Or => "OR",
        }
    }

    /// Parse a caller token, ignoring case.
    pub fn parse(token: &str) -> ValidationResult<Self> {
        let trimmed = token.trim();
        if trimmed.eq_ignore_ascii_case("and") {
            Ok(Connective::And)
        } else if trimmed.eq_ignore_ascii_case("or") {
            Ok(Connective::Or)
        } else {
            Err(ValidationError::UnknownConnective {
                token: token.to_string(),
            })
        }
    }
}

impl FromStr for Connective {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Connective::parse(s)
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

// ============================================================================
// PREDICATES
// ============================================================================

/// `column <op> value`, with the value always bound.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub comparison: Comparison,
    pub value: BindValue,
}

impl Predicate {
    pub fn new(
        column: impl Into<String>,
        comparison: Comparison,
        value: impl Into<BindValue>,
    ) -> Self {
        Self {
            column: column.into(),
            comparison,
            value: value.into(),
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<BindValue>) -> Self {
        Self::new(column, Comparison::Eq, value)
    }
}

/// A predicate together with the connective that joins it to the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub connective: Connective,
    pub predicate: Predicate,
}

/// Ordered list of clauses. The connective of the first clause is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate joined by `connective`.
    pub fn push(&mut self, connective: Connective, predicate: Predicate) {
        self.clauses.push(Clause {
            connective,
            predicate,
        });
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.push(Connective::And, predicate);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}
