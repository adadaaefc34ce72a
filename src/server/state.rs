//! Application state shared across handlers

use std::sync::Arc;

use crate::inference::InferenceContext;

/// Read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<InferenceContext>,
}

impl AppState {
    pub fn new(context: Arc<InferenceContext>) -> Self {
        Self { context }
    }
}
