//! Inference dispatch
//!
//! - [`InferenceContext`]: model and feature ordering, loaded once at startup
//! - [`record`]: one-row record assembly and categorical coercion
//! - [`loader`]: artifact loading

mod context;
pub mod loader;
pub mod record;

pub use context::{format_prediction, InferenceContext};
pub use loader::{load_feature_names, load_model};
pub use record::FeatureRow;
