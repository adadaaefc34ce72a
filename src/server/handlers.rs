//! HTTP request handlers

use std::sync::Arc;
use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::inference::format_prediction;
use crate::schema::{self, RequestContract, SalesRequest};

use super::error::Result;
use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub prediction: String,
}

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}

/// Validate a sales request and return a point prediction.
///
/// The body is decoded here rather than through the `Json` extractor so that
/// malformed JSON is reported in the same error shape as field violations.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PredictionResponse>> {
    let request = SalesRequest::from_slice(&body)?;
    let value = state.context.predict(&request)?;

    info!(
        outlet = %request.outlet_identifier,
        item_type = %request.item_type,
        prediction = value,
        "Prediction served"
    );

    Ok(Json(PredictionResponse {
        prediction: format_prediction(value),
    }))
}

/// Liveness probe.
pub async fn health_check() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Sales Prediction API is running",
    })
}

pub async fn request_schema() -> Json<RequestContract> {
    Json(schema::describe())
}
