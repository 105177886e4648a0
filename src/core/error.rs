use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::modules::backend::BackendError;
use crate::shared::types::{ApiResponse, FieldErrors};
use crate::shared::validation::field_errors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: {message}")]
    FieldValidation {
        message: String,
        fields: FieldErrors,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Upstream timeout: {0}")]
    Timeout(String),
}

impl AppError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized(_))
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Timeout(msg) => AppError::Timeout(msg),
            BackendError::Transport(msg) => AppError::ExternalServiceError(msg),
            BackendError::Decode(msg) => {
                AppError::ExternalServiceError(format!("Unexpected backend response: {}", msg))
            }
            BackendError::Status {
                status,
                message,
                code,
                field_errors,
                ..
            } => match status {
                401 => AppError::Unauthorized(message),
                403 => AppError::Forbidden(message),
                404 => AppError::NotFound(message),
                400 | 409 | 422 if !field_errors.is_empty() => AppError::FieldValidation {
                    message,
                    fields: field_errors,
                },
                409 => AppError::Conflict(message),
                400 | 422 => AppError::Validation(message),
                _ if code == "401" => AppError::Unauthorized(message),
                _ => AppError::ExternalServiceError(message),
            },
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::FieldValidation {
            message: "Please correct the highlighted fields".to_string(),
            fields: field_errors(&errors),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ApiResponse::<()>::error(Some(msg), None),
            ),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::<()>::error(Some(msg.clone()), Some(vec![msg])),
            ),
            AppError::FieldValidation { message, fields } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiResponse::<()>::field_error(Some(message), fields),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::<()>::error(Some(msg), None),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::<()>::error(Some("Internal server error".to_string()), None),
                )
            }
            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ApiResponse::<()>::error(Some(msg), None),
            ),
            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ApiResponse::<()>::error(Some(msg), None),
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ApiResponse::<()>::error(Some(msg), None),
            ),
            AppError::ExternalServiceError(msg) => {
                tracing::error!("External service error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ApiResponse::<()>::error(Some(msg), None),
                )
            }
            AppError::Timeout(msg) => {
                tracing::error!("Upstream timeout: {}", msg);
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    ApiResponse::<()>::error(
                        Some("The planning service did not respond in time".to_string()),
                        None,
                    ),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
