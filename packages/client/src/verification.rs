use common::{PendingVerificationView, Prediction, VerificationStatus};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{ApiError, ConflictKind, ensure_success};
use crate::{ApiClient, Session};

/// Corrected prediction arrays, typically produced by committing a
/// [`common::PredictionDraft`].
pub struct Corrections {
    pub scrap: Vec<Prediction>,
    pub plate: Vec<Prediction>,
}

/// Owner-side controller over the verification workflow.
pub struct VerificationController {
    client: ApiClient,
    session: Session,
}

#[derive(Deserialize)]
struct QueueEnvelope {
    pending_verifications: Vec<PendingVerificationView>,
}

impl VerificationController {
    pub(crate) fn new(client: ApiClient, session: Session) -> Self {
        Self { client, session }
    }

    /// The factory's review queue, each entry joined with labourer identity.
    pub async fn list_pending(&self) -> Result<Vec<PendingVerificationView>, ApiError> {
        let resp = self
            .client
            .http
            .get(self.client.url("/owner/pending-verifications"))
            .query(&[("factory_id", self.session.factory_id)])
            .send()
            .await?;
        let resp = ensure_success(resp, ConflictKind::Conflict).await?;
        Ok(resp.json::<QueueEnvelope>().await?.pending_verifications)
    }

    /// Record a terminal decision, optionally with corrected predictions.
    ///
    /// A non-terminal decision is rejected before any network call.
    pub async fn verify(
        &self,
        analysis_id: i32,
        decision: VerificationStatus,
        owner_notes: Option<&str>,
        corrections: Option<Corrections>,
    ) -> Result<(), ApiError> {
        if !decision.is_terminal() {
            return Err(ApiError::Validation(
                "decision must be 'approved' or 'rejected'".into(),
            ));
        }

        let (scrap, plate) = match corrections {
            Some(c) => (Some(c.scrap), Some(c.plate)),
            None => (None, None),
        };
        let body = json!({
            "analysis_id": analysis_id,
            "factory_id": self.session.factory_id,
            "owner_id": self.session.user_id,
            "verification_status": decision,
            "owner_notes": owner_notes,
            "corrected_scrap_predictions": scrap,
            "corrected_plate_predictions": plate,
        });
        let resp = self
            .client
            .http
            .post(self.client.url("/owner/verify-analysis"))
            .json(&body)
            .send()
            .await?;
        ensure_success(resp, ConflictKind::InvalidState).await?;
        debug!(
            analysis_id,
            decision = decision.as_str(),
            "verification decision recorded"
        );
        Ok(())
    }
}
