//! Field-level validation errors
//!
//! Errors are collected per offending field and reported together. The item
//! shape follows the `{"type", "loc", "msg", "input"}` convention common to
//! Python web frameworks, so existing clients can keep parsing them.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Root of every location path.
const BODY: &str = "body";

/// One violation of the request contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

impl FieldError {
    fn at(field: &str, kind: &'static str, msg: impl Into<String>, input: Option<Value>) -> Self {
        Self {
            kind,
            loc: vec![BODY.to_string(), field.to_string()],
            msg: msg.into(),
            input,
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::at(field, "missing", "Field required", None)
    }

    pub fn float_type(field: &str, input: &Value) -> Self {
        Self::at(field, "float_type", "Input should be a valid number", Some(input.clone()))
    }

    pub fn int_type(field: &str, input: &Value) -> Self {
        Self::at(field, "int_type", "Input should be a valid integer", Some(input.clone()))
    }

    pub fn int_from_float(field: &str, input: &Value) -> Self {
        Self::at(
            field,
            "int_from_float",
            "Input should be a valid integer, got a number with a fractional part",
            Some(input.clone()),
        )
    }

    pub fn literal(field: &str, input: &Value, expected: &[&str]) -> Self {
        Self::at(
            field,
            "literal_error",
            format!("Input should be {}", quote_alternatives(expected)),
            Some(input.clone()),
        )
    }

    pub fn greater_than_equal(field: &str, min: f64, input: Value) -> Self {
        Self::at(
            field,
            "greater_than_equal",
            format!("Input should be greater than or equal to {}", min),
            Some(input),
        )
    }

    pub fn less_than_equal(field: &str, max: f64, input: Value) -> Self {
        Self::at(
            field,
            "less_than_equal",
            format!("Input should be less than or equal to {}", max),
            Some(input),
        )
    }

    /// Body bytes were not valid JSON.
    pub fn json_invalid(reason: impl std::fmt::Display) -> Self {
        Self {
            kind: "json_invalid",
            loc: vec![BODY.to_string()],
            msg: format!("JSON decode error: {}", reason),
            input: None,
        }
    }

    /// Body was valid JSON but not an object.
    pub fn not_an_object(input: &Value) -> Self {
        Self {
            kind: "model_attributes_type",
            loc: vec![BODY.to_string()],
            msg: "Input should be a valid dictionary or object to extract fields from".to_string(),
            input: Some(input.clone()),
        }
    }

    /// Name of the offending field, if the error is attached to one.
    pub fn field(&self) -> Option<&str> {
        match self.loc.as_slice() {
            [_, field, ..] => Some(field.as_str()),
            _ => None,
        }
    }
}

/// `'a'`, `'a' or 'b'`, `'a', 'b' or 'c'`
fn quote_alternatives(options: &[&str]) -> String {
    let quoted: Vec<String> = options.iter().map(|o| format!("'{}'", o)).collect();
    match quoted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
    }
}

/// Every contract violation found in one payload.
#[derive(Debug, Clone, PartialEq, Default, Error)]
#[error("{} validation error(s): {}", .errors.len(), summarize(.errors))]
pub struct ValidationFailure {
    errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| match e.field() {
            Some(field) => format!("{}: {}", field, e.msg),
            None => e.msg.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationFailure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(error: FieldError) -> Self {
        Self { errors: vec![error] }
    }

    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether any error is attached to `field`.
    pub fn mentions(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field() == Some(field))
    }

    /// Stable-sort errors by the position of their field in `order`.
    pub(crate) fn sort_by_field_order(&mut self, order: &[&str]) {
        self.errors.sort_by_key(|e| {
            e.field()
                .and_then(|f| order.iter().position(|o| *o == f))
                .unwrap_or(usize::MAX)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quote_alternatives() {
        assert_eq!(quote_alternatives(&["Low Fat"]), "'Low Fat'");
        assert_eq!(quote_alternatives(&["Low Fat", "Regular"]), "'Low Fat' or 'Regular'");
        assert_eq!(
            quote_alternatives(&["Tier 1", "Tier 2", "Tier 3"]),
            "'Tier 1', 'Tier 2' or 'Tier 3'"
        );
    }

    #[test]
    fn test_field_error_serialization() {
        let err = FieldError::greater_than_equal("Outlet_Establishment_Year", 1900.0, json!(1850));
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["type"], "greater_than_equal");
        assert_eq!(value["loc"], json!(["body", "Outlet_Establishment_Year"]));
        assert_eq!(value["msg"], "Input should be greater than or equal to 1900");
        assert_eq!(value["input"], 1850);
    }

    #[test]
    fn test_missing_omits_input() {
        let value = serde_json::to_value(FieldError::missing("Item_MRP")).unwrap();
        assert!(value.get("input").is_none());
        assert_eq!(value["msg"], "Field required");
    }

    #[test]
    fn test_failure_ordering_and_display() {
        let mut failure = ValidationFailure::new();
        failure.push(FieldError::missing("Item_MRP"));
        failure.push(FieldError::missing("Item_Weight"));
        failure.sort_by_field_order(&["Item_Weight", "Item_MRP"]);

        assert_eq!(failure.errors()[0].field(), Some("Item_Weight"));
        assert!(failure.mentions("Item_MRP"));
        assert!(!failure.mentions("Outlet_Size"));
        assert_eq!(
            failure.to_string(),
            "2 validation error(s): Item_Weight: Field required; Item_MRP: Field required"
        );
    }

    #[test]
    fn test_body_level_errors_have_no_field() {
        let err = FieldError::not_an_object(&json!([1, 2]));
        assert_eq!(err.field(), None);
        assert_eq!(err.loc, vec!["body".to_string()]);
    }
}
