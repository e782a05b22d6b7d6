//! Dashboard-side controllers for the scrap verification service.
//!
//! Everything here talks to the HTTP API with an explicit [`Session`];
//! validation that can fail locally (decision values, draft edits, the
//! deletion guard) is checked before any network call.

pub mod error;
pub mod session;
pub mod submission;
pub mod verification;

pub use error::ApiError;
pub use session::Session;
pub use submission::SubmissionController;
pub use verification::VerificationController;

use common::{AnalysisRecord, Prediction};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConflictKind, ensure_success};

/// HTTP client for the verification service.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    base_url: String,
}

/// A completed analysis as handed over by the AI engine.
#[derive(Serialize)]
pub struct NewAnalysis {
    pub labourer_id: i32,
    pub factory_id: i32,
    pub truck_number: String,
    pub scrap_predictions: Vec<Prediction>,
    pub plate_predictions: Vec<Prediction>,
    pub scrap_image: String,
    pub plate_image: String,
}

#[derive(Deserialize)]
struct AnalysisEnvelope {
    analysis: AnalysisRecord,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn submissions(&self, session: Session) -> SubmissionController {
        SubmissionController::new(self.clone(), session)
    }

    pub fn verifications(&self, session: Session) -> VerificationController {
        VerificationController::new(self.clone(), session)
    }

    /// Record a completed analysis; returns the stored record.
    pub async fn create_analysis(&self, new: &NewAnalysis) -> Result<AnalysisRecord, ApiError> {
        let resp = self
            .http
            .post(self.url("/analysis/"))
            .json(new)
            .send()
            .await?;
        let resp = ensure_success(resp, ConflictKind::Conflict).await?;
        let envelope: AnalysisEnvelope = resp.json().await?;
        debug!(analysis_id = envelope.analysis.id, "analysis recorded");
        Ok(envelope.analysis)
    }

    pub async fn get_analysis(&self, id: i32) -> Result<AnalysisRecord, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/analysis/{id}")))
            .send()
            .await?;
        let resp = ensure_success(resp, ConflictKind::Conflict).await?;
        let envelope: AnalysisEnvelope = resp.json().await?;
        Ok(envelope.analysis)
    }

    /// Delete a record, checking the deletion guard on the last known state
    /// first so an obviously doomed call never leaves the client. The server
    /// re-checks against current state and wins on disagreement.
    pub async fn delete_analysis(&self, record: &AnalysisRecord) -> Result<(), ApiError> {
        if !record.can_delete() {
            return Err(ApiError::Conflict(
                "Analysis cannot be deleted in its current state".into(),
            ));
        }
        let resp = self
            .http
            .delete(self.url(&format!("/analysis/{}", record.id)))
            .send()
            .await?;
        ensure_success(resp, ConflictKind::Conflict).await?;
        debug!(analysis_id = record.id, "analysis deleted");
        Ok(())
    }
}
