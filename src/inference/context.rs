//! Process-wide inference context

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{Result, SalesError};
use crate::model::ObliviousEnsemble;
use crate::schema::SalesRequest;

use super::record;

/// Loaded model plus the column order it is fed in.
///
/// Built once at startup and shared read-only (behind an `Arc`) by every
/// request. Nothing in here is mutated after construction.
#[derive(Debug, Clone)]
pub struct InferenceContext {
    model: ObliviousEnsemble,
    feature_names: Vec<String>,
}

impl InferenceContext {
    /// Pair a model with its feature ordering.
    ///
    /// An empty or duplicated feature list is rejected. A list that merely
    /// disagrees with the model is accepted with a warning; the disagreement
    /// surfaces on every prediction instead.
    pub fn new(model: ObliviousEnsemble, feature_names: Vec<String>) -> Result<Self> {
        check_feature_names(&feature_names)?;
        if feature_names != model.feature_names {
            warn!(
                stored = ?feature_names,
                model = ?model.feature_names,
                "Feature list does not match the model's feature names; predictions will fail"
            );
        }
        Ok(Self { model, feature_names })
    }

    pub fn model(&self) -> &ObliviousEnsemble {
        &self.model
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Whether the stored feature list equals the model's own feature names.
    pub fn features_agree(&self) -> bool {
        self.feature_names == self.model.feature_names
    }

    /// Single-row prediction for a validated request.
    pub fn predict(&self, request: &SalesRequest) -> Result<f64> {
        let frame = record::assemble(request, &self.feature_names)?;
        let row = record::row_values(&frame)?;
        let value = self.model.predict_row(&row.names, &row.values)?;
        debug!(prediction = value, "Single-row inference complete");
        Ok(value)
    }
}

pub(crate) fn check_feature_names(names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Err(SalesError::InvalidModel("feature name list is empty".to_string()));
    }
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(SalesError::InvalidModel(format!(
                "feature name list repeats '{}'",
                name
            )));
        }
    }
    Ok(())
}

/// Human-readable prediction message.
pub fn format_prediction(value: f64) -> String {
    format!("Predicted Sales: {:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ObliviousTree, Split};
    use serde_json::json;

    fn feature_names() -> Vec<String> {
        crate::schema::FIELD_NAMES.iter().map(|s| s.to_string()).collect()
    }

    fn model() -> ObliviousEnsemble {
        ObliviousEnsemble {
            feature_names: feature_names(),
            categorical_features: crate::schema::CATEGORICAL_FIELDS.iter().map(|s| s.to_string()).collect(),
            scale: 1.0,
            bias: 1000.0,
            trees: vec![ObliviousTree {
                splits: vec![
                    Split::Float { feature: 4, border: 140.0 },
                    Split::OneHot { feature: 9, value: "Grocery Store".to_string() },
                ],
                leaf_values: vec![-10.0, 250.5, -300.0, -200.0],
            }],
        }
    }

    fn request(outlet_type: &str) -> SalesRequest {
        SalesRequest::from_value(&json!({
            "Item_Weight": 9.3,
            "Item_Fat_Content": "Low Fat",
            "Item_Visibility": 0.016,
            "Item_Type": "Dairy",
            "Item_MRP": 249.8,
            "Outlet_Identifier": "OUT049",
            "Outlet_Establishment_Year": 1999,
            "Outlet_Size": "Medium",
            "Outlet_Location_Type": "Tier 1",
            "Outlet_Type": outlet_type
        }))
        .unwrap()
    }

    #[test]
    fn test_predict() {
        let context = InferenceContext::new(model(), feature_names()).unwrap();
        assert!(context.features_agree());
        assert_eq!(context.predict(&request("Supermarket Type1")).unwrap(), 1250.5);
        assert_eq!(context.predict(&request("Grocery Store")).unwrap(), 800.0);
    }

    #[test]
    fn test_predict_is_deterministic() {
        let context = InferenceContext::new(model(), feature_names()).unwrap();
        let first = context.predict(&request("Supermarket Type1")).unwrap();
        let second = context.predict(&request("Supermarket Type1")).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_mismatched_feature_list_fails_per_request() {
        let mut names = feature_names();
        names.swap(0, 1);
        let context = InferenceContext::new(model(), names).unwrap();
        assert!(!context.features_agree());
        let err = context.predict(&request("Supermarket Type1")).unwrap_err();
        assert!(matches!(err, SalesError::FeatureMismatch { .. }));
    }

    #[test]
    fn test_unknown_feature_in_list_fails_per_request() {
        let mut names = feature_names();
        names[0] = "Item_Identifier".to_string();
        let context = InferenceContext::new(model(), names).unwrap();
        assert!(matches!(
            context.predict(&request("Supermarket Type1")),
            Err(SalesError::Data(_))
        ));
    }

    #[test]
    fn test_feature_list_rejected_when_empty_or_repeated() {
        assert!(InferenceContext::new(model(), vec![]).is_err());

        let mut names = feature_names();
        names.push("Item_MRP".to_string());
        let err = InferenceContext::new(model(), names).unwrap_err();
        assert!(err.to_string().contains("repeats 'Item_MRP'"));
    }

    #[test]
    fn test_format_prediction() {
        assert_eq!(format_prediction(3239.0400000001), "Predicted Sales: 3239.04");
        assert_eq!(format_prediction(1250.5), "Predicted Sales: 1250.50");
        assert_eq!(format_prediction(-12.5), "Predicted Sales: -12.50");
    }
}
