//! Sales prediction request and its validation
//!
//! Parsing runs in two passes over the raw JSON object:
//! 1. each field is type-checked and, for categorical fields, matched against
//!    its vocabulary;
//! 2. numeric ranges are checked through the `validator` derive.
//!
//! Both passes record every violation so a client sees all offending fields at
//! once.

use serde_json::{json, Map, Value};
use validator::{Validate, ValidationErrors};

use super::categories::{
    Categorical, FatContent, ItemType, LocationType, OutletIdentifier, OutletSize, OutletType,
};
use super::validation::{FieldError, ValidationFailure};

pub const ITEM_WEIGHT: &str = "Item_Weight";
pub const ITEM_FAT_CONTENT: &str = "Item_Fat_Content";
pub const ITEM_VISIBILITY: &str = "Item_Visibility";
pub const ITEM_TYPE: &str = "Item_Type";
pub const ITEM_MRP: &str = "Item_MRP";
pub const OUTLET_IDENTIFIER: &str = "Outlet_Identifier";
pub const OUTLET_ESTABLISHMENT_YEAR: &str = "Outlet_Establishment_Year";
pub const OUTLET_SIZE: &str = "Outlet_Size";
pub const OUTLET_LOCATION_TYPE: &str = "Outlet_Location_Type";
pub const OUTLET_TYPE: &str = "Outlet_Type";

/// Request fields in declaration order.
pub const FIELD_NAMES: [&str; 10] = [
    ITEM_WEIGHT,
    ITEM_FAT_CONTENT,
    ITEM_VISIBILITY,
    ITEM_TYPE,
    ITEM_MRP,
    OUTLET_IDENTIFIER,
    OUTLET_ESTABLISHMENT_YEAR,
    OUTLET_SIZE,
    OUTLET_LOCATION_TYPE,
    OUTLET_TYPE,
];

/// Fields the model treats as categorical and receives as text.
pub const CATEGORICAL_FIELDS: [&str; 6] = [
    ITEM_FAT_CONTENT,
    ITEM_TYPE,
    OUTLET_IDENTIFIER,
    OUTLET_SIZE,
    OUTLET_LOCATION_TYPE,
    OUTLET_TYPE,
];

pub const MIN_VISIBILITY: f64 = 0.0;
pub const MAX_VISIBILITY: f64 = 1.0;
pub const MIN_YEAR: i64 = 1900;
pub const MAX_YEAR: i64 = 2025;

/// A validated description of one item sold at one outlet.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRequest {
    /// Weight in kg.
    pub item_weight: f64,
    pub item_fat_content: FatContent,
    /// Fraction of the outlet's display area allotted to the item.
    pub item_visibility: f64,
    pub item_type: ItemType,
    /// Maximum retail price.
    pub item_mrp: f64,
    pub outlet_identifier: OutletIdentifier,
    pub outlet_establishment_year: i64,
    pub outlet_size: OutletSize,
    pub outlet_location_type: LocationType,
    pub outlet_type: OutletType,
}

/// Numeric fields that survived type checking, awaiting range checks.
#[derive(Debug, Default, Validate)]
struct NumericFields {
    #[validate(range(min = 0.0))]
    item_weight: Option<f64>,
    #[validate(range(min = MIN_VISIBILITY, max = MAX_VISIBILITY))]
    item_visibility: Option<f64>,
    #[validate(range(min = 0.0))]
    item_mrp: Option<f64>,
    #[validate(range(min = MIN_YEAR, max = MAX_YEAR))]
    outlet_establishment_year: Option<i64>,
}

/// Declared bounds of a range-checked field.
struct Bounds {
    min: f64,
    max: Option<f64>,
}

impl NumericFields {
    /// Wire name, offending value and bounds for a `validator` field key.
    fn offending(&self, key: &str) -> Option<(&'static str, f64, Value, Bounds)> {
        let non_negative = Bounds { min: 0.0, max: None };
        match key {
            "item_weight" => self.item_weight.map(|v| (ITEM_WEIGHT, v, json!(v), non_negative)),
            "item_visibility" => self.item_visibility.map(|v| {
                let bounds = Bounds { min: MIN_VISIBILITY, max: Some(MAX_VISIBILITY) };
                (ITEM_VISIBILITY, v, json!(v), bounds)
            }),
            "item_mrp" => self.item_mrp.map(|v| (ITEM_MRP, v, json!(v), non_negative)),
            "outlet_establishment_year" => self.outlet_establishment_year.map(|v| {
                let bounds = Bounds { min: MIN_YEAR as f64, max: Some(MAX_YEAR as f64) };
                (OUTLET_ESTABLISHMENT_YEAR, v as f64, json!(v), bounds)
            }),
            _ => None,
        }
    }

    fn check_ranges(&self, failure: &mut ValidationFailure) {
        if let Err(errors) = self.validate() {
            collect_range_errors(self, &errors, failure);
        }
    }
}

fn collect_range_errors(fields: &NumericFields, errors: &ValidationErrors, failure: &mut ValidationFailure) {
    for (key, field_errors) in errors.field_errors() {
        let key = key.to_string();
        let Some((field, value, input, bounds)) = fields.offending(&key) else {
            continue;
        };
        if !field_errors.is_empty() {
            failure.push(range_error(field, value, input, &bounds));
        }
    }
}

fn range_error(field: &str, value: f64, input: Value, bounds: &Bounds) -> FieldError {
    match bounds.max {
        Some(max) if value > max => FieldError::less_than_equal(field, max, input),
        _ => FieldError::greater_than_equal(field, bounds.min, input),
    }
}

fn take_float(body: &Map<String, Value>, field: &str, failure: &mut ValidationFailure) -> Option<f64> {
    match body.get(field) {
        None => {
            failure.push(FieldError::missing(field));
            None
        }
        Some(Value::Number(n)) => n.as_f64().or_else(|| {
            failure.push(FieldError::float_type(field, &Value::Number(n.clone())));
            None
        }),
        Some(other) => {
            failure.push(FieldError::float_type(field, other));
            None
        }
    }
}

fn take_int(body: &Map<String, Value>, field: &str, failure: &mut ValidationFailure) -> Option<i64> {
    let raw = match body.get(field) {
        None => {
            failure.push(FieldError::missing(field));
            return None;
        }
        Some(raw) => raw,
    };
    let Value::Number(n) = raw else {
        failure.push(FieldError::int_type(field, raw));
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    // Whole-valued floats such as 1999.0 are accepted.
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(f as i64),
        Some(f) if f.is_finite() && f.fract() != 0.0 => {
            failure.push(FieldError::int_from_float(field, raw));
            None
        }
        _ => {
            failure.push(FieldError::int_type(field, raw));
            None
        }
    }
}

fn take_category<C: Categorical>(
    body: &Map<String, Value>,
    field: &str,
    failure: &mut ValidationFailure,
) -> Option<C> {
    match body.get(field) {
        None => {
            failure.push(FieldError::missing(field));
            None
        }
        Some(raw) => {
            let parsed = raw.as_str().and_then(C::parse);
            if parsed.is_none() {
                failure.push(FieldError::literal(field, raw, &C::labels()));
            }
            parsed
        }
    }
}

impl SalesRequest {
    /// Parse and validate raw body bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationFailure> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| ValidationFailure::single(FieldError::json_invalid(e)))?;
        Self::from_value(&value)
    }

    /// Validate an already-decoded JSON value.
    pub fn from_value(value: &Value) -> Result<Self, ValidationFailure> {
        let body = value
            .as_object()
            .ok_or_else(|| ValidationFailure::single(FieldError::not_an_object(value)))?;

        let mut failure = ValidationFailure::new();

        let numeric = NumericFields {
            item_weight: take_float(body, ITEM_WEIGHT, &mut failure),
            item_visibility: take_float(body, ITEM_VISIBILITY, &mut failure),
            item_mrp: take_float(body, ITEM_MRP, &mut failure),
            outlet_establishment_year: take_int(body, OUTLET_ESTABLISHMENT_YEAR, &mut failure),
        };
        let fat_content = take_category::<FatContent>(body, ITEM_FAT_CONTENT, &mut failure);
        let item_type = take_category::<ItemType>(body, ITEM_TYPE, &mut failure);
        let outlet_identifier = take_category::<OutletIdentifier>(body, OUTLET_IDENTIFIER, &mut failure);
        let outlet_size = take_category::<OutletSize>(body, OUTLET_SIZE, &mut failure);
        let location_type = take_category::<LocationType>(body, OUTLET_LOCATION_TYPE, &mut failure);
        let outlet_type = take_category::<OutletType>(body, OUTLET_TYPE, &mut failure);

        numeric.check_ranges(&mut failure);

        if !failure.is_empty() {
            failure.sort_by_field_order(&FIELD_NAMES);
            return Err(failure);
        }

        match (
            numeric.item_weight,
            fat_content,
            numeric.item_visibility,
            item_type,
            numeric.item_mrp,
            outlet_identifier,
            numeric.outlet_establishment_year,
            outlet_size,
            location_type,
            outlet_type,
        ) {
            (
                Some(item_weight),
                Some(item_fat_content),
                Some(item_visibility),
                Some(item_type),
                Some(item_mrp),
                Some(outlet_identifier),
                Some(outlet_establishment_year),
                Some(outlet_size),
                Some(outlet_location_type),
                Some(outlet_type),
            ) => Ok(SalesRequest {
                item_weight,
                item_fat_content,
                item_visibility,
                item_type,
                item_mrp,
                outlet_identifier,
                outlet_establishment_year,
                outlet_size,
                outlet_location_type,
                outlet_type,
            }),
            // Every absent field has already been recorded above.
            _ => Err(failure),
        }
    }

    /// Text label of a categorical field, by wire name.
    pub fn category_label(&self, field: &str) -> Option<&'static str> {
        match field {
            ITEM_FAT_CONTENT => Some(self.item_fat_content.as_str()),
            ITEM_TYPE => Some(self.item_type.as_str()),
            OUTLET_IDENTIFIER => Some(self.outlet_identifier.as_str()),
            OUTLET_SIZE => Some(self.outlet_size.as_str()),
            OUTLET_LOCATION_TYPE => Some(self.outlet_location_type.as_str()),
            OUTLET_TYPE => Some(self.outlet_type.as_str()),
            _ => None,
        }
    }

    /// The request as a JSON object keyed by wire names.
    pub fn to_json(&self) -> Value {
        json!({
            ITEM_WEIGHT: self.item_weight,
            ITEM_FAT_CONTENT: self.item_fat_content.as_str(),
            ITEM_VISIBILITY: self.item_visibility,
            ITEM_TYPE: self.item_type.as_str(),
            ITEM_MRP: self.item_mrp,
            OUTLET_IDENTIFIER: self.outlet_identifier.as_str(),
            OUTLET_ESTABLISHMENT_YEAR: self.outlet_establishment_year,
            OUTLET_SIZE: self.outlet_size.as_str(),
            OUTLET_LOCATION_TYPE: self.outlet_location_type.as_str(),
            OUTLET_TYPE: self.outlet_type.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_body() -> Value {
        json!({
            "Item_Weight": 9.3,
            "Item_Fat_Content": "Low Fat",
            "Item_Visibility": 0.016,
            "Item_Type": "Dairy",
            "Item_MRP": 249.8,
            "Outlet_Identifier": "OUT049",
            "Outlet_Establishment_Year": 1999,
            "Outlet_Size": "Medium",
            "Outlet_Location_Type": "Tier 1",
            "Outlet_Type": "Supermarket Type1"
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut body = valid_body();
        body[field] = value;
        body
    }

    fn without(field: &str) -> Value {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove(field);
        body
    }

    #[test]
    fn test_valid_request() {
        let request = SalesRequest::from_value(&valid_body()).unwrap();
        assert_eq!(request.item_weight, 9.3);
        assert_eq!(request.item_fat_content, FatContent::LowFat);
        assert_eq!(request.item_type, ItemType::Dairy);
        assert_eq!(request.outlet_identifier, OutletIdentifier::Out049);
        assert_eq!(request.outlet_establishment_year, 1999);
        assert_eq!(request.outlet_location_type, LocationType::Tier1);
        assert_eq!(request.outlet_type, OutletType::SupermarketType1);
    }

    #[test]
    fn test_to_json_matches_input() {
        let request = SalesRequest::from_value(&valid_body()).unwrap();
        assert_eq!(request.to_json(), valid_body());
    }

    #[test]
    fn test_year_below_range() {
        let failure = SalesRequest::from_value(&with(OUTLET_ESTABLISHMENT_YEAR, json!(1850))).unwrap_err();
        assert_eq!(failure.errors().len(), 1);
        let err = &failure.errors()[0];
        assert_eq!(err.field(), Some(OUTLET_ESTABLISHMENT_YEAR));
        assert_eq!(err.kind, "greater_than_equal");
        assert_eq!(err.msg, "Input should be greater than or equal to 1900");
    }

    #[test]
    fn test_year_above_range() {
        let failure = SalesRequest::from_value(&with(OUTLET_ESTABLISHMENT_YEAR, json!(2026))).unwrap_err();
        let err = &failure.errors()[0];
        assert_eq!(err.kind, "less_than_equal");
        assert_eq!(err.msg, "Input should be less than or equal to 2025");
    }

    #[test]
    fn test_year_bounds_inclusive() {
        assert!(SalesRequest::from_value(&with(OUTLET_ESTABLISHMENT_YEAR, json!(1900))).is_ok());
        assert!(SalesRequest::from_value(&with(OUTLET_ESTABLISHMENT_YEAR, json!(2025))).is_ok());
    }

    #[test]
    fn test_year_accepts_whole_float() {
        let request = SalesRequest::from_value(&with(OUTLET_ESTABLISHMENT_YEAR, json!(1999.0))).unwrap();
        assert_eq!(request.outlet_establishment_year, 1999);
    }

    #[test]
    fn test_year_rejects_fraction_and_strings() {
        let failure = SalesRequest::from_value(&with(OUTLET_ESTABLISHMENT_YEAR, json!(1999.5))).unwrap_err();
        assert_eq!(failure.errors()[0].kind, "int_from_float");

        let failure = SalesRequest::from_value(&with(OUTLET_ESTABLISHMENT_YEAR, json!("1999"))).unwrap_err();
        assert_eq!(failure.errors()[0].kind, "int_type");
    }

    #[test]
    fn test_unknown_item_type() {
        let failure = SalesRequest::from_value(&with(ITEM_TYPE, json!("Electronics"))).unwrap_err();
        assert!(failure.mentions(ITEM_TYPE));
        let err = &failure.errors()[0];
        assert_eq!(err.kind, "literal_error");
        assert!(err.msg.starts_with("Input should be 'Breads', 'Breakfast'"));
        assert!(err.msg.ends_with("'Snack Foods', 'Soft Drinks' or 'Starchy Foods'"));
        assert_eq!(err.input, Some(json!("Electronics")));
    }

    #[test]
    fn test_every_categorical_field_rejects_unknown_label() {
        for field in CATEGORICAL_FIELDS {
            let failure = SalesRequest::from_value(&with(field, json!("Nope"))).unwrap_err();
            assert_eq!(failure.errors().len(), 1, "field {}", field);
            assert!(failure.mentions(field), "field {}", field);
        }
    }

    #[test]
    fn test_categorical_rejects_non_string() {
        let failure = SalesRequest::from_value(&with(OUTLET_SIZE, json!(2))).unwrap_err();
        assert_eq!(failure.errors()[0].kind, "literal_error");
    }

    #[test]
    fn test_visibility_bounds() {
        assert!(SalesRequest::from_value(&with(ITEM_VISIBILITY, json!(0))).is_ok());
        assert!(SalesRequest::from_value(&with(ITEM_VISIBILITY, json!(1))).is_ok());

        let failure = SalesRequest::from_value(&with(ITEM_VISIBILITY, json!(1.2))).unwrap_err();
        assert_eq!(failure.errors()[0].kind, "less_than_equal");
        assert_eq!(failure.errors()[0].msg, "Input should be less than or equal to 1");

        let failure = SalesRequest::from_value(&with(ITEM_VISIBILITY, json!(-0.1))).unwrap_err();
        assert_eq!(failure.errors()[0].kind, "greater_than_equal");
        assert_eq!(failure.errors()[0].msg, "Input should be greater than or equal to 0");
    }

    #[test]
    fn test_negative_weight_and_price() {
        let mut body = with(ITEM_WEIGHT, json!(-1.0));
        body[ITEM_MRP] = json!(-20);
        let failure = SalesRequest::from_value(&body).unwrap_err();
        assert_eq!(failure.errors().len(), 2);
        assert_eq!(failure.errors()[0].field(), Some(ITEM_WEIGHT));
        assert_eq!(failure.errors()[1].field(), Some(ITEM_MRP));
    }

    #[test]
    fn test_integer_widens_to_float() {
        let request = SalesRequest::from_value(&with(ITEM_MRP, json!(250))).unwrap();
        assert_eq!(request.item_mrp, 250.0);
    }

    #[test]
    fn test_numeric_type_errors() {
        let failure = SalesRequest::from_value(&with(ITEM_WEIGHT, json!("heavy"))).unwrap_err();
        assert_eq!(failure.errors()[0].kind, "float_type");

        let failure = SalesRequest::from_value(&with(ITEM_WEIGHT, json!(true))).unwrap_err();
        assert_eq!(failure.errors()[0].kind, "float_type");

        let failure = SalesRequest::from_value(&with(ITEM_WEIGHT, Value::Null)).unwrap_err();
        assert_eq!(failure.errors()[0].kind, "float_type");
    }

    #[test]
    fn test_missing_field() {
        let failure = SalesRequest::from_value(&without(OUTLET_TYPE)).unwrap_err();
        assert_eq!(failure.errors().len(), 1);
        assert_eq!(failure.errors()[0].kind, "missing");
        assert!(failure.mentions(OUTLET_TYPE));
    }

    #[test]
    fn test_all_violations_reported_in_field_order() {
        let body = json!({
            "Item_Weight": -3,
            "Item_Fat_Content": "Extra Fat",
            "Item_Type": "Electronics",
            "Item_MRP": 10,
            "Outlet_Identifier": "OUT049",
            "Outlet_Establishment_Year": 1850,
            "Outlet_Size": "Medium",
            "Outlet_Location_Type": "Tier 9",
            "Outlet_Type": "Supermarket Type1"
        });
        let failure = SalesRequest::from_value(&body).unwrap_err();
        let fields: Vec<&str> = failure.errors().iter().filter_map(|e| e.field()).collect();
        assert_eq!(
            fields,
            vec![
                ITEM_WEIGHT,
                ITEM_FAT_CONTENT,
                ITEM_VISIBILITY,
                ITEM_TYPE,
                OUTLET_ESTABLISHMENT_YEAR,
                OUTLET_LOCATION_TYPE,
            ]
        );
    }

    #[test]
    fn test_extra_fields_ignored() {
        let request = SalesRequest::from_value(&with("Item_Identifier", json!("FDA15"))).unwrap();
        assert_eq!(request.item_type, ItemType::Dairy);
    }

    #[test]
    fn test_body_must_be_object() {
        let failure = SalesRequest::from_value(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(failure.errors()[0].kind, "model_attributes_type");
    }

    #[test]
    fn test_invalid_json_bytes() {
        let failure = SalesRequest::from_slice(b"{not json").unwrap_err();
        assert_eq!(failure.errors()[0].kind, "json_invalid");
    }

    #[test]
    fn test_category_label() {
        let request = SalesRequest::from_value(&valid_body()).unwrap();
        assert_eq!(request.category_label(OUTLET_LOCATION_TYPE), Some("Tier 1"));
        assert_eq!(request.category_label(ITEM_WEIGHT), None);
    }
}
