use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::prediction::Prediction;
use crate::verification::VerificationStatus;

/// One analyzed image pair and its workflow state, as carried on the wire.
///
/// Created in the `analyzed` state (not submitted, no status), moved to
/// `pending` by the labourer's submission, and to a terminal status by the
/// owner's verification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AnalysisRecord {
    pub id: i32,
    /// Owning factory; immutable after creation.
    pub factory_id: i32,
    /// Creating labourer; immutable.
    pub labourer_id: i32,
    /// Reviewing owner, resolved from the factory when submitted.
    pub owner_id: Option<i32>,
    /// Analysis (creation) time; immutable.
    pub timestamp: DateTime<Utc>,
    #[schema(example = "KA-01-HG-1234")]
    pub truck_number: String,
    /// Scrap-type predictions, highest confidence first.
    pub scrap_predictions: Vec<Prediction>,
    /// Plate-text predictions, in plate reading order.
    pub plate_predictions: Vec<Prediction>,
    pub labourer_notes: Option<String>,
    pub owner_notes: Option<String>,
    pub submitted_to_owner: bool,
    /// Set exactly once, when the record is submitted.
    pub submission_timestamp: Option<DateTime<Utc>>,
    /// Absent until submitted; `pending` while queued; then terminal.
    pub verification_status: Option<VerificationStatus>,
    /// Set exactly once, when the owner decides.
    pub verification_timestamp: Option<DateTime<Utc>>,
    /// True iff the owner supplied corrected predictions with the decision.
    pub predictions_corrected: bool,
    /// Opaque stored-image reference.
    pub scrap_image: String,
    /// Opaque stored-image reference.
    pub plate_image: String,
}

impl AnalysisRecord {
    /// Deletion Guard predicate: a record may be removed only before it
    /// enters the owner's queue, or after the owner rejected it. Pending
    /// records must be resolved first; approved records are retained as the
    /// system of record.
    pub fn can_delete(&self) -> bool {
        !self.submitted_to_owner
            || self.verification_status == Some(VerificationStatus::Rejected)
    }
}

/// A pending queue entry as the owner sees it: the record joined with the
/// identity of the labourer who submitted it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PendingVerificationView {
    #[serde(flatten)]
    pub record: AnalysisRecord,
    #[schema(example = "Ravi Kumar")]
    pub labourer_name: String,
    #[schema(example = "ravi@example.com")]
    pub labourer_email: String,
    #[schema(example = "EMP-017")]
    pub employee_id: String,
}
