use axum::Json;
use axum::extract::{Query, State};
use chrono::Utc;
use common::VerificationStatus;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{analysis, factory};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::find_analysis;
use crate::models::analysis::record_from_model;
use crate::models::shared::Ack;
use crate::models::submission::*;
use crate::state::AppState;

/// List a labourer's unfinished analyses.
#[utoipa::path(
    get,
    path = "/pending-submissions",
    tag = "Labourer",
    operation_id = "listPendingSubmissions",
    summary = "List a labourer's unfinished analyses",
    description = "Returns every record created by the labourer that is not approved: \
        unsubmitted drafts, submissions awaiting review, and rejected submissions \
        (which stay visible for resubmission or deletion). Newest first; records \
        with equal timestamps keep insertion order.",
    params(PendingSubmissionsQuery),
    responses(
        (status = 200, description = "Pending records", body = PendingSubmissionsResponse),
        (status = 500, description = "Internal error", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(labourer_id = query.labourer_id))]
pub async fn list_pending_submissions(
    State(state): State<AppState>,
    Query(query): Query<PendingSubmissionsQuery>,
) -> Result<Json<PendingSubmissionsResponse>, AppError> {
    let rows = analysis::Entity::find()
        .filter(analysis::Column::LabourerId.eq(query.labourer_id))
        .filter(
            Condition::any()
                .add(analysis::Column::VerificationStatus.is_null())
                .add(analysis::Column::VerificationStatus.ne(VerificationStatus::Approved)),
        )
        .order_by_desc(analysis::Column::Timestamp)
        .order_by_asc(analysis::Column::Id)
        .all(&state.db)
        .await?;

    let pending = rows
        .into_iter()
        .map(record_from_model)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(PendingSubmissionsResponse::new(pending)))
}

/// Full analysis history for a labourer.
#[utoipa::path(
    get,
    path = "/history",
    tag = "Labourer",
    operation_id = "labourerHistory",
    summary = "List all of a labourer's analyses",
    params(PendingSubmissionsQuery),
    responses(
        (status = 200, description = "All records, newest first", body = HistoryResponse),
        (status = 500, description = "Internal error", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(labourer_id = query.labourer_id))]
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<PendingSubmissionsQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let rows = analysis::Entity::find()
        .filter(analysis::Column::LabourerId.eq(query.labourer_id))
        .order_by_desc(analysis::Column::Timestamp)
        .order_by_asc(analysis::Column::Id)
        .all(&state.db)
        .await?;

    let history = rows
        .into_iter()
        .map(record_from_model)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(HistoryResponse::new(history)))
}

/// Submit an analysis into the owner's review queue.
#[utoipa::path(
    post,
    path = "/submit-analysis",
    tag = "Labourer",
    operation_id = "submitAnalysis",
    summary = "Submit an analysis for owner verification",
    description = "Moves an analysis from `analyzed` to `pending`. The transition is a \
        conditional update keyed on the not-yet-submitted state, so at most one of two \
        racing submits succeeds; the loser gets a 409.",
    request_body = SubmitAnalysisRequest,
    responses(
        (status = 200, description = "Submitted", body = Ack),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 403, description = "Labourer/factory do not match the record", body = ErrorBody),
        (status = 404, description = "Analysis not found", body = ErrorBody),
        (status = 409, description = "Already submitted", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(analysis_id = payload.analysis_id))]
pub async fn submit_analysis(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmitAnalysisRequest>,
) -> Result<Json<Ack>, AppError> {
    let notes = validate_submit(&payload)?;

    // Ownership ids are immutable, so the checks hold without a transaction;
    // the conditional update below is the authoritative precondition.
    let record = find_analysis(&state.db, payload.analysis_id).await?;
    if record.labourer_id != payload.labourer_id || record.factory_id != payload.factory_id {
        return Err(AppError::PermissionDenied);
    }

    let factory_row = factory::Entity::find_by_id(record.factory_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Factory not found".into()))?;

    let now = Utc::now();
    let updated = analysis::Entity::update_many()
        .col_expr(analysis::Column::SubmittedToOwner, Expr::value(true))
        .col_expr(
            analysis::Column::SubmissionTimestamp,
            Expr::value(Some(now)),
        )
        .col_expr(
            analysis::Column::VerificationStatus,
            Expr::value(Some(VerificationStatus::Pending)),
        )
        .col_expr(analysis::Column::LabourerNotes, Expr::value(notes))
        .col_expr(
            analysis::Column::OwnerId,
            Expr::value(Some(factory_row.owner_id)),
        )
        .filter(analysis::Column::Id.eq(payload.analysis_id))
        // Conditional update: only an unsubmitted record takes the transition.
        .filter(analysis::Column::SubmittedToOwner.eq(false))
        .exec(&state.db)
        .await?;

    if updated.rows_affected == 0 {
        return Err(AppError::AlreadySubmitted);
    }

    info!(
        analysis_id = payload.analysis_id,
        labourer_id = payload.labourer_id,
        factory_id = payload.factory_id,
        "Analysis submitted for verification"
    );

    Ok(Json(Ack::success("Analysis submitted for verification")))
}
