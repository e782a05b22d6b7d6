use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

/// Envelope returned by all endpoints on failure.
///
/// Clients may rely only on `message` plus the HTTP status code; there is no
/// machine-readable error code beyond the status.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Always `"error"`.
    #[schema(example = "error")]
    pub status: &'static str,
    /// Human-readable error description.
    #[schema(example = "Analysis not found")]
    pub message: String,
}

/// Application-level error type, mirroring the workflow's error taxonomy.
#[derive(Debug)]
pub enum AppError {
    /// Malformed input (bad predictions, bad decision value). 400.
    Validation(String),
    /// Caller's labourer/owner/factory ids do not match the record. 403.
    /// Deliberately generic; never names the mismatched field.
    PermissionDenied,
    /// Referenced analysis/user/factory does not exist. 404.
    NotFound(String),
    /// Submit on a record that already left the `analyzed` state. 409.
    AlreadySubmitted,
    /// Verify on a record that is not pending. 409.
    InvalidState(String),
    /// Deletion guard failed on re-check. 409.
    Conflict(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        let (code, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                "You do not have permission to act on this analysis".into(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::AlreadySubmitted => (
                StatusCode::CONFLICT,
                "Analysis has already been submitted for verification".into(),
            ),
            AppError::InvalidState(msg) => (StatusCode::CONFLICT, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".into(),
                )
            }
        };

        (
            code,
            ErrorBody {
                status: "error",
                message,
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}
