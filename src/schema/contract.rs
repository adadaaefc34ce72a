//! Machine-readable description of the request contract

use serde::Serialize;

use super::categories::{
    Categorical, FatContent, ItemType, LocationType, OutletIdentifier, OutletSize, OutletType,
};
use super::request::*;

pub const API_TITLE: &str = "Sales Prediction API";

/// Constraint attached to one request field.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldConstraint {
    Float {
        minimum: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        maximum: Option<f64>,
    },
    Integer { minimum: i64, maximum: i64 },
    Enum { values: Vec<&'static str> },
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(flatten)]
    pub constraint: FieldConstraint,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestContract {
    pub title: &'static str,
    pub version: &'static str,
    pub required: Vec<&'static str>,
    pub fields: Vec<FieldSpec>,
}

fn enumerated<C: Categorical>() -> FieldConstraint {
    FieldConstraint::Enum { values: C::labels() }
}

fn spec(name: &'static str, description: &'static str, constraint: FieldConstraint) -> FieldSpec {
    FieldSpec { name, description, constraint }
}

/// The `/predict` request contract, fields in declaration order.
pub fn describe() -> RequestContract {
    let non_negative = || FieldConstraint::Float { minimum: 0.0, maximum: None };

    RequestContract {
        title: API_TITLE,
        version: env!("CARGO_PKG_VERSION"),
        required: FIELD_NAMES.to_vec(),
        fields: vec![
            spec(ITEM_WEIGHT, "Weight in kg", non_negative()),
            spec(ITEM_FAT_CONTENT, "Fat content", enumerated::<FatContent>()),
            spec(
                ITEM_VISIBILITY,
                "Fraction of display area (0-1)",
                FieldConstraint::Float { minimum: MIN_VISIBILITY, maximum: Some(MAX_VISIBILITY) },
            ),
            spec(ITEM_TYPE, "Type of item", enumerated::<ItemType>()),
            spec(ITEM_MRP, "Maximum retail price in INR", non_negative()),
            spec(OUTLET_IDENTIFIER, "Outlet ID", enumerated::<OutletIdentifier>()),
            spec(
                OUTLET_ESTABLISHMENT_YEAR,
                "Year outlet was founded",
                FieldConstraint::Integer { minimum: MIN_YEAR, maximum: MAX_YEAR },
            ),
            spec(OUTLET_SIZE, "Outlet size", enumerated::<OutletSize>()),
            spec(OUTLET_LOCATION_TYPE, "Location type", enumerated::<LocationType>()),
            spec(OUTLET_TYPE, "Outlet type", enumerated::<OutletType>()),
        ],
    }
}
