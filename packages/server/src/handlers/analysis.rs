use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use common::VerificationStatus;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::{analysis, factory, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::{find_analysis, predictions_json};
use crate::models::analysis::*;
use crate::models::shared::Ack;
use crate::state::AppState;

/// Record a completed analysis.
#[utoipa::path(
    post,
    path = "/",
    tag = "Analysis",
    operation_id = "createAnalysis",
    summary = "Record a completed scrap analysis",
    description = "Stores the AI predictions and image references for a truck the \
        labourer just analyzed. The record starts unsubmitted, with no verification \
        status, and appears in the labourer's pending list immediately.",
    request_body = CreateAnalysisRequest,
    responses(
        (status = 201, description = "Record created", body = AnalysisResponse),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 403, description = "Labourer does not belong to the factory", body = ErrorBody),
        (status = 404, description = "Labourer or factory not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(labourer_id = payload.labourer_id))]
pub async fn create_analysis(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAnalysisRequest>,
) -> Result<(StatusCode, Json<AnalysisResponse>), AppError> {
    validate_create_analysis(&payload)?;

    let labourer = user::Entity::find_by_id(payload.labourer_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Labourer not found".into()))?;
    factory::Entity::find_by_id(payload.factory_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Factory not found".into()))?;
    if labourer.factory_id != Some(payload.factory_id) {
        return Err(AppError::PermissionDenied);
    }

    let model = analysis::ActiveModel {
        truck_number: Set(payload.truck_number.trim().to_string()),
        scrap_predictions: Set(predictions_json(&payload.scrap_predictions)?),
        plate_predictions: Set(predictions_json(&payload.plate_predictions)?),
        scrap_image: Set(payload.scrap_image),
        plate_image: Set(payload.plate_image),
        labourer_id: Set(payload.labourer_id),
        factory_id: Set(payload.factory_id),
        owner_id: Set(None),
        labourer_notes: Set(None),
        owner_notes: Set(None),
        submitted_to_owner: Set(false),
        submission_timestamp: Set(None),
        verification_status: Set(None),
        verification_timestamp: Set(None),
        predictions_corrected: Set(false),
        timestamp: Set(Utc::now()),
        ..Default::default()
    };
    let model = model.insert(&state.db).await?;

    info!(analysis_id = model.id, "Analysis recorded");

    Ok((
        StatusCode::CREATED,
        Json(AnalysisResponse::new(record_from_model(model)?)),
    ))
}

/// Fetch a single analysis.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Analysis",
    operation_id = "getAnalysis",
    summary = "Fetch one analysis record",
    params(("id" = i32, Path, description = "Analysis ID")),
    responses(
        (status = 200, description = "The record", body = AnalysisResponse),
        (status = 404, description = "Analysis not found", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_analysis(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let model = find_analysis(&state.db, id).await?;
    Ok(Json(AnalysisResponse::new(record_from_model(model)?)))
}

/// Delete an analysis, if its state still allows deletion.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Analysis",
    operation_id = "deleteAnalysis",
    summary = "Delete a deletable analysis",
    description = "A record is deletable while it has not been submitted, or once it \
        has been rejected. Pending and approved records are kept. The guard is \
        evaluated against current state inside the delete itself, so a submit \
        racing the delete cannot leave a submitted record half-removed.",
    params(("id" = i32, Path, description = "Analysis ID")),
    responses(
        (status = 200, description = "Deleted", body = Ack),
        (status = 404, description = "Analysis not found", body = ErrorBody),
        (status = 409, description = "Record is pending or approved", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_analysis(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Ack>, AppError> {
    let deleted = analysis::Entity::delete_many()
        .filter(analysis::Column::Id.eq(id))
        // Guard re-checked against persisted state in the same statement.
        .filter(
            Condition::any()
                .add(analysis::Column::SubmittedToOwner.eq(false))
                .add(analysis::Column::VerificationStatus.eq(VerificationStatus::Rejected)),
        )
        .exec(&state.db)
        .await?;

    if deleted.rows_affected == 0 {
        return match find_analysis(&state.db, id).await {
            Ok(_) => Err(AppError::Conflict(
                "Analysis cannot be deleted in its current state".into(),
            )),
            Err(e) => Err(e),
        };
    }

    info!(analysis_id = id, "Analysis deleted");

    Ok(Json(Ack::success("Analysis deleted")))
}
