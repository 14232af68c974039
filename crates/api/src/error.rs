//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use snapped_shared::{SchemaValidationError, UploadResponse, UploadRuleViolation};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // Validation errors
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),
    #[error(transparent)]
    UploadRejected(#[from] UploadRuleViolation),

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Internal errors
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Schema(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            ApiError::UploadRejected(violation) => {
                let status = match violation {
                    UploadRuleViolation::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                    UploadRuleViolation::InvalidFileType { .. } => {
                        StatusCode::UNSUPPORTED_MEDIA_TYPE
                    }
                    UploadRuleViolation::SessionFull { .. } => StatusCode::CONFLICT,
                };
                (status, violation.code())
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(code, error = %self, "Request failed");
        } else {
            tracing::warn!(code, error = %self, "Request rejected");
        }

        let body = UploadResponse::failure(self.to_string()).with_data("code", code);

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
