use common::{PendingVerificationView, Prediction, VerificationStatus, scrap_class};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::shared::validate_notes;

/// Request body for the owner's verify decision.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct VerifyAnalysisRequest {
    pub analysis_id: i32,
    pub factory_id: i32,
    pub owner_id: i32,
    /// The decision: `approved` or `rejected` (`pending` is not a decision).
    pub verification_status: VerificationStatus,
    pub owner_notes: Option<String>,
    /// When present and non-empty, replaces the stored scrap predictions.
    pub corrected_scrap_predictions: Option<Vec<Prediction>>,
    /// When present and non-empty, replaces the stored plate predictions.
    pub corrected_plate_predictions: Option<Vec<Prediction>>,
}

/// Query parameters for the owner's pending-verification queue.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct PendingVerificationsQuery {
    pub factory_id: i32,
}

/// `{"status":"success","pending_verifications":[...]}`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PendingVerificationsResponse {
    /// Always `"success"`.
    #[schema(example = "success")]
    pub status: &'static str,
    pub pending_verifications: Vec<PendingVerificationView>,
}

impl PendingVerificationsResponse {
    pub fn new(pending_verifications: Vec<PendingVerificationView>) -> Self {
        Self {
            status: "success",
            pending_verifications,
        }
    }
}

/// A validated, normalized verify request.
pub struct VerifiedDecision {
    pub decision: VerificationStatus,
    pub owner_notes: Option<String>,
    /// Corrections, with empty arrays collapsed to "not supplied".
    pub corrected_scrap: Option<Vec<Prediction>>,
    pub corrected_plate: Option<Vec<Prediction>>,
}

impl VerifiedDecision {
    pub fn has_corrections(&self) -> bool {
        self.corrected_scrap.is_some() || self.corrected_plate.is_some()
    }
}

/// Validate a verify request.
///
/// Prediction structure is enforced by `Prediction` deserialization; on top
/// of that, corrected scrap classes must come from the closed scrap-type
/// set. An empty corrections array means "no correction", matching a client
/// that sends its working copy unconditionally.
pub fn validate_verify(req: VerifyAnalysisRequest) -> Result<VerifiedDecision, AppError> {
    if !req.verification_status.is_terminal() {
        return Err(AppError::Validation(
            "verification_status must be 'approved' or 'rejected'".into(),
        ));
    }

    let owner_notes = validate_notes(req.owner_notes.as_deref(), "Owner notes")?;

    let corrected_scrap = req
        .corrected_scrap_predictions
        .filter(|preds| !preds.is_empty());
    if let Some(ref preds) = corrected_scrap {
        scrap_class::ensure_known_scrap_classes(preds)
            .map_err(|e| AppError::Validation(e.to_string()))?;
    }

    let corrected_plate = req
        .corrected_plate_predictions
        .filter(|preds| !preds.is_empty());

    Ok(VerifiedDecision {
        decision: req.verification_status,
        owner_notes,
        corrected_scrap,
        corrected_plate,
    })
}
