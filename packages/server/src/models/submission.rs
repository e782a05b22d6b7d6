use common::AnalysisRecord;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::validate_notes;

/// Request body for submitting an analysis to the factory owner.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct SubmitAnalysisRequest {
    pub analysis_id: i32,
    pub labourer_id: i32,
    pub factory_id: i32,
    /// Optional free-text notes attached at submission time.
    #[schema(example = "Mixed load, rear section mostly K2")]
    pub notes: Option<String>,
}

/// Query parameters for the labourer's pending-submission list.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct PendingSubmissionsQuery {
    pub labourer_id: i32,
}

/// `{"status":"success","pending":[...]}`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PendingSubmissionsResponse {
    /// Always `"success"`.
    #[schema(example = "success")]
    pub status: &'static str,
    /// Non-approved records, newest first.
    pub pending: Vec<AnalysisRecord>,
}

impl PendingSubmissionsResponse {
    pub fn new(pending: Vec<AnalysisRecord>) -> Self {
        Self {
            status: "success",
            pending,
        }
    }
}

/// `{"status":"success","history":[...]}`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct HistoryResponse {
    /// Always `"success"`.
    #[schema(example = "success")]
    pub status: &'static str,
    /// Every record of the labourer, newest first.
    pub history: Vec<AnalysisRecord>,
}

impl HistoryResponse {
    pub fn new(history: Vec<AnalysisRecord>) -> Self {
        Self {
            status: "success",
            history,
        }
    }
}

/// Validate and normalize a submit request; returns the trimmed notes.
pub fn validate_submit(req: &SubmitAnalysisRequest) -> Result<Option<String>, AppError> {
    validate_notes(req.notes.as_deref(), "Labourer notes")
}
