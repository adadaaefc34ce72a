//! Single-row record assembly
//!
//! A validated request becomes a one-row `DataFrame` whose columns follow the
//! stored feature ordering. Categorical columns are forced to text before the
//! row is handed to the model.

use polars::prelude::*;

use crate::error::{Result, SalesError};
use crate::model::FeatureValue;
use crate::schema::{
    SalesRequest, CATEGORICAL_FIELDS, ITEM_FAT_CONTENT, ITEM_MRP, ITEM_TYPE, ITEM_VISIBILITY, ITEM_WEIGHT,
    OUTLET_ESTABLISHMENT_YEAR, OUTLET_IDENTIFIER, OUTLET_LOCATION_TYPE, OUTLET_SIZE, OUTLET_TYPE,
};

/// Column names and values of a one-row record, in model order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub names: Vec<String>,
    pub values: Vec<FeatureValue>,
}

/// All request fields as a one-row frame, in request declaration order.
fn request_frame(request: &SalesRequest) -> Result<DataFrame> {
    let text = |field: &str| -> Column {
        let label = request.category_label(field).unwrap_or_default();
        Series::new(field.into(), [label]).into()
    };

    let columns: Vec<Column> = vec![
        Series::new(ITEM_WEIGHT.into(), [request.item_weight]).into(),
        text(ITEM_FAT_CONTENT),
        Series::new(ITEM_VISIBILITY.into(), [request.item_visibility]).into(),
        text(ITEM_TYPE),
        Series::new(ITEM_MRP.into(), [request.item_mrp]).into(),
        text(OUTLET_IDENTIFIER),
        Series::new(OUTLET_ESTABLISHMENT_YEAR.into(), [request.outlet_establishment_year]).into(),
        text(OUTLET_SIZE),
        text(OUTLET_LOCATION_TYPE),
        text(OUTLET_TYPE),
    ];
    Ok(DataFrame::new(columns)?)
}

/// Cast every categorical column present in `frame` to text.
pub fn coerce_categoricals(frame: &mut DataFrame) -> Result<()> {
    for name in CATEGORICAL_FIELDS {
        let coerced = match frame.column(name) {
            Ok(column) if column.dtype() != &DataType::String => column.cast(&DataType::String)?,
            _ => continue,
        };
        frame.with_column(coerced)?;
    }
    Ok(())
}

/// Build the one-row frame the model consumes.
///
/// Fails when `feature_names` names a column the request does not carry or
/// repeats a column.
pub fn assemble(request: &SalesRequest, feature_names: &[String]) -> Result<DataFrame> {
    let frame = request_frame(request)?;
    let mut frame = frame.select(feature_names.iter().map(String::as_str))?;
    coerce_categoricals(&mut frame)?;
    Ok(frame)
}

/// Extract the single row of `frame` as typed feature values.
pub fn row_values(frame: &DataFrame) -> Result<FeatureRow> {
    if frame.height() != 1 {
        return Err(SalesError::Inference(format!(
            "expected a single-row record, got {} rows",
            frame.height()
        )));
    }

    let mut names = Vec::with_capacity(frame.width());
    let mut values = Vec::with_capacity(frame.width());
    for column in frame.get_columns() {
        let value = match column.get(0)? {
            AnyValue::Float64(v) => FeatureValue::Numeric(v),
            AnyValue::Float32(v) => FeatureValue::Numeric(v as f64),
            AnyValue::Int64(v) => FeatureValue::Numeric(v as f64),
            AnyValue::Int32(v) => FeatureValue::Numeric(v as f64),
            AnyValue::UInt64(v) => FeatureValue::Numeric(v as f64),
            AnyValue::UInt32(v) => FeatureValue::Numeric(v as f64),
            AnyValue::String(s) => FeatureValue::Text(s.to_string()),
            AnyValue::StringOwned(s) => FeatureValue::Text(s.to_string()),
            other => {
                return Err(SalesError::Inference(format!(
                    "unsupported value {:?} in column '{}'",
                    other,
                    column.name()
                )))
            }
        };
        names.push(column.name().to_string());
        values.push(value);
    }
    Ok(FeatureRow { names, values })
}
