//! Regression model
//!
//! The served model is a gradient-boosted ensemble of oblivious trees stored
//! as JSON. Numeric features are compared against float borders; categorical
//! features are matched as text.

mod oblivious;

pub use oblivious::{ObliviousEnsemble, ObliviousTree, Split, MAX_DEPTH};

use std::io::Read;

use crate::error::Result;

/// One cell of the single-row record fed to the model.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Numeric(f64),
    Text(String),
}

impl FeatureValue {
    pub fn is_text(&self) -> bool {
        matches!(self, FeatureValue::Text(_))
    }
}

impl std::fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureValue::Numeric(v) => write!(f, "{}", v),
            FeatureValue::Text(t) => f.write_str(t),
        }
    }
}

/// Deserialize and structurally check a model artifact.
pub fn read_model<R: Read>(reader: R) -> Result<ObliviousEnsemble> {
    let model: ObliviousEnsemble = serde_json::from_reader(reader)?;
    model.check_structure()?;
    Ok(model)
}
