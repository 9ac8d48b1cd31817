//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use validator::ValidationErrors;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Missing or malformed input
    #[error("{0}")]
    Validation(String),

    // Chat provider failures
    #[error("{context}: {details}")]
    Provider { context: &'static str, details: String },

    // Anything else
    #[error("{context}: {details}")]
    Internal { context: &'static str, details: String },
}

impl AppError {
    pub fn provider(details: impl Into<String>) -> Self {
        AppError::Provider { context: "AI chat error", details: details.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Provider { .. } | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Validation(msg) => json!({ "error": msg }),
            AppError::Provider { context, details } => {
                tracing::error!("Provider error: {}", details);
                json!({ "error": context, "details": details })
            }
            AppError::Internal { context, details } => {
                tracing::error!("Internal error ({}): {}", context, details);
                json!({ "error": context, "details": details })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        // Surface the first field message; every rule on our requests carries one.
        let message = errors
            .field_errors()
            .into_values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        AppError::Validation(message)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return AppError::provider("provider request timed out");
        }
        AppError::provider(err.to_string())
    }
}
