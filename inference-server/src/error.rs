//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::model::InvocationError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Request failed schema validation; never reaches the encoder
    #[error("{0}")]
    ValidationError(String),

    /// No classifier was loaded at startup
    #[error("Model not loaded")]
    ModelUnavailable,

    /// Classifier invocation failed, fallback included
    #[error(transparent)]
    InvocationError(#[from] InvocationError),

    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// Machine-checkable error kind
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::ModelUnavailable => "model_unavailable",
            AppError::InvocationError(_) => "invocation_error",
            AppError::InternalError(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InvocationError(_) => StatusCode::BAD_REQUEST,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::ValidationError(msg) => {
                tracing::debug!("Validation error: {}", msg);
                msg.clone()
            }
            AppError::ModelUnavailable => {
                tracing::warn!("Prediction requested but no model is loaded");
                self.to_string()
            }
            AppError::InvocationError(err) => {
                tracing::error!("Invocation error: {}", err);
                err.to_string()
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
            "code": self.code(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}
