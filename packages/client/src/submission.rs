use common::AnalysisRecord;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{ApiError, ConflictKind, ensure_success};
use crate::{ApiClient, Session};

/// Labourer-side controller over the submission workflow.
pub struct SubmissionController {
    client: ApiClient,
    session: Session,
}

#[derive(Deserialize)]
struct PendingEnvelope {
    pending: Vec<AnalysisRecord>,
}

#[derive(Deserialize)]
struct HistoryEnvelope {
    history: Vec<AnalysisRecord>,
}

impl SubmissionController {
    pub(crate) fn new(client: ApiClient, session: Session) -> Self {
        Self { client, session }
    }

    /// Non-approved records of the session's labourer, newest first.
    pub async fn list_pending(&self) -> Result<Vec<AnalysisRecord>, ApiError> {
        let resp = self
            .client
            .http
            .get(self.client.url("/labourer/pending-submissions"))
            .query(&[("labourer_id", self.session.user_id)])
            .send()
            .await?;
        let resp = ensure_success(resp, ConflictKind::Conflict).await?;
        Ok(resp.json::<PendingEnvelope>().await?.pending)
    }

    /// Every record of the session's labourer, newest first.
    pub async fn history(&self) -> Result<Vec<AnalysisRecord>, ApiError> {
        let resp = self
            .client
            .http
            .get(self.client.url("/labourer/history"))
            .query(&[("labourer_id", self.session.user_id)])
            .send()
            .await?;
        let resp = ensure_success(resp, ConflictKind::Conflict).await?;
        Ok(resp.json::<HistoryEnvelope>().await?.history)
    }

    /// Submit an analysis into the owner's review queue.
    ///
    /// Not retried on transport failure: the submit may already have been
    /// applied, and a blind retry would only surface the conflict.
    pub async fn submit(&self, analysis_id: i32, notes: Option<&str>) -> Result<(), ApiError> {
        let body = json!({
            "analysis_id": analysis_id,
            "labourer_id": self.session.user_id,
            "factory_id": self.session.factory_id,
            "notes": notes,
        });
        let resp = self
            .client
            .http
            .post(self.client.url("/labourer/submit-analysis"))
            .json(&body)
            .send()
            .await?;
        ensure_success(resp, ConflictKind::AlreadySubmitted).await?;
        debug!(analysis_id, "analysis submitted for verification");
        Ok(())
    }
}
