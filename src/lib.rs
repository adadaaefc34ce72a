//! Sales Predictor - retail sales prediction service
//!
//! This crate serves point predictions of item/outlet sales from a
//! pre-trained gradient-boosted tree model:
//! - Strict validation of the ten-field sales request
//! - Feature assembly in the model's training column order
//! - Oblivious-tree ensemble inference
//! - HTTP server and CLI interfaces
//!
//! # Modules
//!
//! - [`schema`] - Request contract, categorical vocabularies, validation errors
//! - [`model`] - Oblivious-tree regression model
//! - [`inference`] - Artifact loading and the prediction pipeline
//! - [`server`] - HTTP server with REST API
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

// Domain
pub mod schema;
pub mod model;
pub mod inference;

// Services
pub mod server;
pub mod cli;

pub use error::{Result, SalesError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Result, SalesError};

    pub use crate::schema::{FieldError, SalesRequest, ValidationFailure};

    pub use crate::model::{FeatureValue, ObliviousEnsemble};

    pub use crate::inference::{format_prediction, InferenceContext};

    pub use crate::server::{create_router, AppState, ServerConfig};
}
