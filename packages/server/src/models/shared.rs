use serde::Serialize;

use crate::error::AppError;

/// Success envelope for mutations: `{"status":"success","message":...}`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct Ack {
    /// Always `"success"`.
    #[schema(example = "success")]
    pub status: &'static str,
    #[schema(example = "Analysis submitted for verification")]
    pub message: String,
}

impl Ack {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

/// Validate an optional free-text notes field (trimmed, max 2000 chars).
/// Returns the trimmed notes, with whitespace-only collapsed to `None`.
pub fn validate_notes(
    notes: Option<&str>,
    field: &str,
) -> Result<Option<String>, AppError> {
    let Some(notes) = notes else { return Ok(None) };
    let trimmed = notes.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > 2000 {
        return Err(AppError::Validation(format!(
            "{field} must be at most 2000 characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}
