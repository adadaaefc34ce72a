//! Symmetric (oblivious) gradient-boosted regression trees
//!
//! Every level of an oblivious tree applies the same split, so a leaf is
//! addressed by one bit per level: split `i` sets bit `i` of the leaf index.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SalesError};

use super::FeatureValue;

/// Deepest tree accepted from an artifact.
pub const MAX_DEPTH: usize = 16;

/// One level of an oblivious tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Split {
    /// Goes right when the numeric value is strictly greater than `border`.
    Float { feature: usize, border: f64 },
    /// Goes right when the text value equals `value`.
    OneHot { feature: usize, value: String },
}

impl Split {
    pub fn feature(&self) -> usize {
        match self {
            Split::Float { feature, .. } | Split::OneHot { feature, .. } => *feature,
        }
    }

    /// Evaluate the split on a single feature value.
    fn goes_right(&self, name: &str, value: &FeatureValue) -> Result<bool> {
        match (self, value) {
            (Split::Float { border, .. }, FeatureValue::Numeric(v)) => Ok(*v > *border),
            (Split::Float { .. }, FeatureValue::Text(t)) => Err(SalesError::Inference(format!(
                "Cannot convert '{}' to float for numeric feature '{}'",
                t, name
            ))),
            (Split::OneHot { value: category, .. }, FeatureValue::Text(t)) => Ok(t == category),
            (Split::OneHot { .. }, FeatureValue::Numeric(v)) => Err(SalesError::Inference(format!(
                "Categorical feature '{}' received numeric value {}; categorical values must be text",
                name, v
            ))),
        }
    }
}

/// A tree with `splits.len()` levels and `2^depth` leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObliviousTree {
    pub splits: Vec<Split>,
    pub leaf_values: Vec<f64>,
}

impl ObliviousTree {
    pub fn depth(&self) -> usize {
        self.splits.len()
    }

    /// Leaf index reached by `row`.
    fn leaf_index(&self, names: &[String], row: &[FeatureValue]) -> Result<usize> {
        let mut index = 0usize;
        for (level, split) in self.splits.iter().enumerate() {
            let feature = split.feature();
            if split.goes_right(&names[feature], &row[feature])? {
                index |= 1 << level;
            }
        }
        Ok(index)
    }

    pub(crate) fn predict(&self, names: &[String], row: &[FeatureValue]) -> Result<f64> {
        let index = self.leaf_index(names, row)?;
        Ok(self.leaf_values[index])
    }

    fn check(&self, tree_idx: usize, names: &[String], categorical: &[bool]) -> Result<()> {
        let invalid = |reason: String| SalesError::InvalidModel(format!("tree {}: {}", tree_idx, reason));

        if self.depth() > MAX_DEPTH {
            return Err(invalid(format!("depth {} exceeds maximum of {}", self.depth(), MAX_DEPTH)));
        }
        let expected_leaves = 1usize << self.depth();
        if self.leaf_values.len() != expected_leaves {
            return Err(invalid(format!(
                "expected {} leaf values for depth {}, found {}",
                expected_leaves,
                self.depth(),
                self.leaf_values.len()
            )));
        }
        if let Some(v) = self.leaf_values.iter().find(|v| !v.is_finite()) {
            return Err(invalid(format!("non-finite leaf value {}", v)));
        }

        for split in &self.splits {
            let feature = split.feature();
            if feature >= names.len() {
                return Err(invalid(format!(
                    "split references feature {} but the model has {} features",
                    feature,
                    names.len()
                )));
            }
            match split {
                Split::Float { border, .. } if !border.is_finite() => {
                    return Err(invalid(format!("non-finite border on '{}'", names[feature])));
                }
                Split::Float { .. } if categorical[feature] => {
                    return Err(invalid(format!("float split on categorical feature '{}'", names[feature])));
                }
                Split::OneHot { .. } if !categorical[feature] => {
                    return Err(invalid(format!("one-hot split on numeric feature '{}'", names[feature])));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn default_scale() -> f64 {
    1.0
}

/// Gradient-boosted ensemble of oblivious trees predicting a single scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObliviousEnsemble {
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub categorical_features: Vec<String>,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub bias: f64,
    pub trees: Vec<ObliviousTree>,
}

impl ObliviousEnsemble {
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(ObliviousTree::depth).max().unwrap_or(0)
    }

    pub fn is_categorical(&self, name: &str) -> bool {
        self.categorical_features.iter().any(|c| c == name)
    }

    /// Reject artifacts that cannot be evaluated safely.
    pub fn check_structure(&self) -> Result<()> {
        if self.feature_names.is_empty() {
            return Err(SalesError::InvalidModel("model declares no features".to_string()));
        }
        for (i, name) in self.feature_names.iter().enumerate() {
            if self.feature_names[..i].contains(name) {
                return Err(SalesError::InvalidModel(format!("duplicate feature name '{}'", name)));
            }
        }
        if let Some(unknown) = self
            .categorical_features
            .iter()
            .find(|c| !self.feature_names.contains(*c))
        {
            return Err(SalesError::InvalidModel(format!(
                "categorical feature '{}' is not a model feature",
                unknown
            )));
        }
        if !self.scale.is_finite() || !self.bias.is_finite() {
            return Err(SalesError::InvalidModel("scale and bias must be finite".to_string()));
        }

        let categorical: Vec<bool> = self.feature_names.iter().map(|n| self.is_categorical(n)).collect();
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.check(idx, &self.feature_names, &categorical)?;
        }
        Ok(())
    }

    /// Predict one row whose columns are named `names`, in order.
    ///
    /// The column names must equal the model's feature names exactly.
    pub fn predict_row(&self, names: &[String], row: &[FeatureValue]) -> Result<f64> {
        if names != self.feature_names.as_slice() {
            return Err(SalesError::FeatureMismatch {
                expected: self.feature_names.clone(),
                actual: names.to_vec(),
            });
        }
        if row.len() != names.len() {
            return Err(SalesError::Inference(format!(
                "row has {} values for {} features",
                row.len(),
                names.len()
            )));
        }

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.predict(&self.feature_names, row)?;
        }
        Ok(self.bias + self.scale * sum)
    }
}
