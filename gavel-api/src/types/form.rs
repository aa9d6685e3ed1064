//! Form value parsing
//!
//! The web client posts form fields as JSON, so numbers can arrive either as
//! JSON numbers or as strings, and an empty string means "not given".

use std::str::FromStr;

use chrono::NaiveDate;
use gavel_core::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};

/// A scalar sent either typed or as form text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue<T> {
    Typed(T),
    Text(String),
}

impl<T> FormValue<T>
where
    T: FromStr + Clone,
{
    /// Parse this value; blank text counts as absent.
    pub fn parse(&self, field: &str) -> ValidationResult<Option<T>> {
        match self {
            FormValue::Typed(v) => Ok(Some(v.clone())),
            FormValue::Text(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<T>()
                    .map(Some)
                    .map_err(|_| {
                        ValidationError::invalid(field, format!("'{}' is not a number", raw))
                    })
            }
        }
    }
}

impl<T> From<T> for FormValue<T> {
    fn from(v: T) -> Self {
        FormValue::Typed(v)
    }
}

/// Parse an optional form number.
pub fn number<T>(field: &str, value: Option<&FormValue<T>>) -> ValidationResult<Option<T>>
where
    T: FromStr + Clone,
{
    match value {
        Some(v) => v.parse(field),
        None => Ok(None),
    }
}

/// Trimmed text, with blank treated as absent.
pub fn text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a `YYYY-MM-DD` date. A trailing time part (`2024-03-01T00:00:00Z`)
/// is ignored.
pub fn date(field: &str, value: Option<&str>) -> ValidationResult<Option<NaiveDate>> {
    let Some(raw) = text(value) else {
        return Ok(None);
    };
    let day = raw.split('T').next().unwrap_or(&raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ValidationError::invalid(field, format!("'{}' is not a YYYY-MM-DD date", raw)))
}

/// Unwrap a value the request must carry.
pub fn required<T>(field: &str, value: Option<T>) -> ValidationResult<T> {
    value.ok_or_else(|| ValidationError::missing(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_accept_json_and_text() {
        let typed: FormValue<i32> = serde_json::from_str("500").unwrap();
        let text_form: FormValue<i32> = serde_json::from_str("\" 500 \"").unwrap();
        assert_eq!(typed.parse("payload"), Ok(Some(500)));
        assert_eq!(text_form.parse("payload"), Ok(Some(500)));
    }

    #[test]
    fn test_blank_text_is_absent() {
        let blank: FormValue<i64> = FormValue::Text("  ".to_string());
        assert_eq!(blank.parse("cc"), Ok(None));
        assert_eq!(number::<i32>("payload", None), Ok(None));
    }

    #[test]
    fn test_bad_number_is_invalid() {
        let bad: FormValue<i32> = FormValue::Text("lots".to_string());
        assert!(matches!(
            bad.parse("payload"),
            Err(ValidationError::InvalidValue { ref field, .. }) if field == "payload"
        ));
    }

    #[test]
    fn test_float_accepts_integer_json() {
        let v: FormValue<f64> = serde_json::from_str("12").unwrap();
        assert_eq!(v.parse("commissionPercent"), Ok(Some(12.0)));
    }

    #[test]
    fn test_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(date("date", Some("2024-03-01")), Ok(expected));
        assert_eq!(date("date", Some("2024-03-01T00:00:00.000Z")), Ok(expected));
        assert_eq!(date("date", Some("")), Ok(None));
        assert!(date("date", Some("01/03/2024")).is_err());
    }

    #[test]
    fn test_required() {
        assert_eq!(required("id", Some(1)), Ok(1));
        assert_eq!(
            required::<i32>("id", None),
            Err(ValidationError::missing("id"))
        );
    }
}
