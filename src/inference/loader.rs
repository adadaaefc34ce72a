//! Startup loading of the model and feature-name artifacts
//!
//! Any failure here is fatal: the caller must not start serving.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::error::{Result, SalesError};
use crate::model::{read_model, ObliviousEnsemble};

use super::context::{check_feature_names, InferenceContext};

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| SalesError::artifact(path, e))
}

/// Read the regression model artifact.
pub fn load_model(path: impl AsRef<Path>) -> Result<ObliviousEnsemble> {
    let path = path.as_ref();
    read_model(open(path)?).map_err(|e| SalesError::artifact(path, e))
}

/// Read the ordered feature-name list (a JSON array of strings).
pub fn load_feature_names(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let names: Vec<String> =
        serde_json::from_reader(open(path)?).map_err(|e| SalesError::artifact(path, e))?;
    check_feature_names(&names).map_err(|e| SalesError::artifact(path, e))?;
    Ok(names)
}

impl InferenceContext {
    /// Load both artifacts and build the shared context.
    pub fn load(model_path: impl AsRef<Path>, feature_names_path: impl AsRef<Path>) -> Result<Self> {
        let model_path = model_path.as_ref();
        let feature_names_path = feature_names_path.as_ref();
        let start = Instant::now();

        let model = load_model(model_path)?;
        info!(
            path = %model_path.display(),
            trees = model.n_trees(),
            max_depth = model.max_depth(),
            features = model.n_features(),
            categorical = model.categorical_features.len(),
            "Regression model loaded"
        );

        let feature_names = load_feature_names(feature_names_path)?;
        info!(
            path = %feature_names_path.display(),
            count = feature_names.len(),
            "Feature names loaded"
        );

        let context = InferenceContext::new(model, feature_names)?;
        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            features_agree = context.features_agree(),
            "Inference context ready"
        );
        Ok(context)
    }
}
