use serde::Deserialize;
use thiserror::Error;

/// Client-side error taxonomy, mirroring the server's HTTP mapping.
///
/// 409 is ambiguous on the wire, so the three conflict variants are picked
/// per operation: submit conflicts mean "already submitted", verify
/// conflicts mean "not awaiting verification", delete conflicts mean "the
/// guard failed".
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    PermissionDenied(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    AlreadySubmitted(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Edit(#[from] common::EditError),
    /// Outcome unknown; mutations are never retried automatically.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response ({status}): {message}")]
    Unexpected { status: u16, message: String },
}

/// Which conflict variant a 409 maps to for the calling operation.
#[derive(Clone, Copy)]
pub(crate) enum ConflictKind {
    AlreadySubmitted,
    InvalidState,
    Conflict,
}

/// Pass a successful response through, or map the failure to `ApiError`.
pub(crate) async fn ensure_success(
    resp: reqwest::Response,
    on_conflict: ConflictKind,
) -> Result<reqwest::Response, ApiError> {
    use reqwest::StatusCode;

    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = error_message(resp).await;
    Err(match status {
        StatusCode::BAD_REQUEST => ApiError::Validation(message),
        StatusCode::FORBIDDEN => ApiError::PermissionDenied(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::CONFLICT => match on_conflict {
            ConflictKind::AlreadySubmitted => ApiError::AlreadySubmitted(message),
            ConflictKind::InvalidState => ApiError::InvalidState(message),
            ConflictKind::Conflict => ApiError::Conflict(message),
        },
        _ => ApiError::Unexpected {
            status: status.as_u16(),
            message,
        },
    })
}

async fn error_message(resp: reqwest::Response) -> String {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        message: String,
    }

    match resp.json::<ErrorEnvelope>().await {
        Ok(envelope) => envelope.message,
        Err(_) => "no error detail".to_string(),
    }
}
