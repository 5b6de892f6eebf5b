//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use health_assistant_core::{model_unavailable_message, DispatchError, ParseDomainError, SubmitError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Resource errors
    NotFound(String),

    // Validation errors (one message per rejected field)
    ValidationError(Vec<String>),

    // Model errors
    ModelUnavailable(String),
    InferenceError(String),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details: Vec<String> = Vec::new();

        let (status, error_message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.as_str()),
            AppError::ValidationError(messages) => {
                details = messages.clone();
                (
                    StatusCode::BAD_REQUEST,
                    messages.first().map(String::as_str).unwrap_or("Invalid input"),
                )
            }
            AppError::ModelUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.as_str()),
            AppError::InferenceError(msg) => {
                tracing::error!("Inference error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed")
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
            "details": details,
        }));

        (status, body).into_response()
    }
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(errors) => AppError::ValidationError(errors.messages()),
            SubmitError::Dispatch(DispatchError::ModelUnavailable { domain, reason }) => {
                tracing::warn!("{}", reason);
                AppError::ModelUnavailable(model_unavailable_message(domain))
            }
            SubmitError::Dispatch(other) => AppError::InferenceError(other.to_string()),
        }
    }
}

impl From<ParseDomainError> for AppError {
    fn from(err: ParseDomainError) -> Self {
        AppError::NotFound(format!("Unknown domain '{}'", err.0))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(err.to_string())
    }
}
