use axum::Json;
use axum::extract::{Query, State};
use chrono::Utc;
use common::{PendingVerificationView, VerificationStatus};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::{info, instrument};

use crate::config::QueueOrder;
use crate::entity::{analysis, factory, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::{find_analysis, predictions_json};
use crate::models::analysis::record_from_model;
use crate::models::shared::Ack;
use crate::models::verification::*;
use crate::state::AppState;

/// List the factory's review queue.
#[utoipa::path(
    get,
    path = "/pending-verifications",
    tag = "Owner",
    operation_id = "listPendingVerifications",
    summary = "List analyses awaiting verification at a factory",
    description = "Returns every submitted-but-undecided analysis of the factory, each \
        joined with the submitting labourer's identity. Oldest submission first by \
        default so the longest-waiting truck is handled first; deployments that \
        prefer freshest-first flip `verification.queue_order`.",
    params(PendingVerificationsQuery),
    responses(
        (status = 200, description = "Review queue", body = PendingVerificationsResponse),
        (status = 404, description = "Factory not found", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(factory_id = query.factory_id))]
pub async fn list_pending_verifications(
    State(state): State<AppState>,
    Query(query): Query<PendingVerificationsQuery>,
) -> Result<Json<PendingVerificationsResponse>, AppError> {
    factory::Entity::find_by_id(query.factory_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Factory not found".into()))?;

    let select = analysis::Entity::find()
        .filter(analysis::Column::FactoryId.eq(query.factory_id))
        .filter(analysis::Column::VerificationStatus.eq(VerificationStatus::Pending))
        .find_also_related(user::Entity);
    let select = match state.config.verification.queue_order {
        QueueOrder::OldestFirst => select.order_by_asc(analysis::Column::SubmissionTimestamp),
        QueueOrder::NewestFirst => select.order_by_desc(analysis::Column::SubmissionTimestamp),
    };
    let rows = select.order_by_asc(analysis::Column::Id).all(&state.db).await?;

    let mut pending = Vec::with_capacity(rows.len());
    for (model, labourer) in rows {
        let labourer = labourer
            .ok_or_else(|| AppError::Internal(format!("analysis {} has no labourer", model.id)))?;
        pending.push(PendingVerificationView {
            record: record_from_model(model)?,
            labourer_name: labourer.name,
            labourer_email: labourer.email,
            employee_id: labourer.employee_id,
        });
    }

    Ok(Json(PendingVerificationsResponse::new(pending)))
}

/// Record the owner's decision on a pending analysis.
#[utoipa::path(
    post,
    path = "/verify-analysis",
    tag = "Owner",
    operation_id = "verifyAnalysis",
    summary = "Approve or reject a pending analysis",
    description = "Applies a terminal decision, optionally with owner notes and \
        corrected predictions. The decision is a conditional update keyed on the \
        `pending` state, so a record is decided at most once; a second decision \
        (or one racing a concurrent owner) gets a 409. Corrections replace the \
        stored prediction arrays wholesale and flag the record as corrected; \
        omitted or empty correction arrays leave the labourer's predictions \
        untouched.",
    request_body = VerifyAnalysisRequest,
    responses(
        (status = 200, description = "Decision recorded", body = Ack),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 403, description = "Owner/factory do not match the record", body = ErrorBody),
        (status = 404, description = "Analysis not found", body = ErrorBody),
        (status = 409, description = "Analysis is not awaiting verification", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(analysis_id = payload.analysis_id))]
pub async fn verify_analysis(
    State(state): State<AppState>,
    AppJson(payload): AppJson<VerifyAnalysisRequest>,
) -> Result<Json<Ack>, AppError> {
    let analysis_id = payload.analysis_id;
    let factory_id = payload.factory_id;
    let owner_id = payload.owner_id;
    let decision = validate_verify(payload)?;

    // Factory/owner ids are immutable once submitted, so the checks hold
    // without a transaction; the conditional update below is the
    // authoritative precondition.
    let record = find_analysis(&state.db, analysis_id).await?;
    if record.factory_id != factory_id {
        return Err(AppError::PermissionDenied);
    }
    if let Some(resolved_owner) = record.owner_id
        && resolved_owner != owner_id
    {
        return Err(AppError::PermissionDenied);
    }

    let now = Utc::now();
    let mut update = analysis::Entity::update_many()
        .col_expr(
            analysis::Column::VerificationStatus,
            Expr::value(Some(decision.decision)),
        )
        .col_expr(
            analysis::Column::VerificationTimestamp,
            Expr::value(Some(now)),
        );
    if let Some(ref notes) = decision.owner_notes {
        update = update.col_expr(analysis::Column::OwnerNotes, Expr::value(Some(notes.clone())));
    }
    if let Some(ref scrap) = decision.corrected_scrap {
        update = update.col_expr(
            analysis::Column::ScrapPredictions,
            Expr::value(predictions_json(scrap)?),
        );
    }
    if let Some(ref plate) = decision.corrected_plate {
        update = update.col_expr(
            analysis::Column::PlatePredictions,
            Expr::value(predictions_json(plate)?),
        );
    }
    if decision.has_corrections() {
        update = update.col_expr(analysis::Column::PredictionsCorrected, Expr::value(true));
    }

    let result = update
        .filter(analysis::Column::Id.eq(analysis_id))
        // Conditional update: only one decision leaves `pending`.
        .filter(analysis::Column::VerificationStatus.eq(VerificationStatus::Pending))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::InvalidState(
            "Analysis is not awaiting verification".into(),
        ));
    }

    info!(
        analysis_id,
        owner_id,
        decision = decision.decision.as_str(),
        corrected = decision.has_corrections(),
        "Verification decision recorded"
    );

    let message = match decision.decision {
        VerificationStatus::Approved => "Analysis approved",
        _ => "Analysis rejected",
    };
    Ok(Json(Ack::success(message)))
}
