//! Error types for the server
//!
//! Each variant maps to one fixed status code. Inference failures are not
//! classified further: whatever went wrong while assembling the record or
//! evaluating the model is reported to the client as a bad request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::SalesError;
use crate::schema::ValidationFailure;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("Prediction error: {0}")]
    Prediction(String),

    #[error("Not Found")]
    NotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

impl From<SalesError> for ServerError {
    fn from(err: SalesError) -> Self {
        ServerError::Prediction(err.to_string())
    }
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Prediction(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ServerError::Validation(failure) => {
                tracing::debug!(errors = failure.errors().len(), "Request failed validation");
                json!({ "detail": failure.errors() })
            }
            ServerError::Prediction(msg) => {
                tracing::warn!(detail = %msg, "Prediction failed");
                json!({ "detail": self.to_string() })
            }
            ServerError::NotFound | ServerError::MethodNotAllowed => {
                json!({ "detail": self.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldError;

    #[test]
    fn test_status_codes() {
        let validation = ServerError::from(ValidationFailure::single(FieldError::missing("Item_MRP")));
        assert_eq!(validation.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ServerError::Prediction("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ServerError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ServerError::MethodNotAllowed.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_inference_errors_become_prediction_errors() {
        let err: ServerError = SalesError::Inference("row has 3 values for 10 features".into()).into();
        assert_eq!(
            err.to_string(),
            "Prediction error: Inference error: row has 3 values for 10 features"
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
