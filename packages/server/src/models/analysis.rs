use common::{AnalysisRecord, Prediction, prediction};
use serde::Deserialize;
use serde::Serialize;

use crate::entity::analysis;
use crate::error::AppError;

/// Request body for recording a completed analysis.
///
/// The AI engine and image upload live outside this service; by the time a
/// record is created the predictions already exist and the images are stored.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateAnalysisRequest {
    pub labourer_id: i32,
    pub factory_id: i32,
    #[schema(example = "KA-01-HG-1234")]
    pub truck_number: String,
    /// At least one scrap-type prediction.
    pub scrap_predictions: Vec<Prediction>,
    /// Plate-text predictions, in plate reading order. May be empty when
    /// plate recognition found nothing.
    pub plate_predictions: Vec<Prediction>,
    #[schema(example = "scrap_20240501_101500.jpg")]
    pub scrap_image: String,
    #[schema(example = "plate_20240501_101500.jpg")]
    pub plate_image: String,
}

/// Success envelope wrapping a single record.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AnalysisResponse {
    /// Always `"success"`.
    #[schema(example = "success")]
    pub status: &'static str,
    pub analysis: AnalysisRecord,
}

impl AnalysisResponse {
    pub fn new(analysis: AnalysisRecord) -> Self {
        Self {
            status: "success",
            analysis,
        }
    }
}

/// Validate a creation request. Prediction structure (class non-empty,
/// confidence in [0,1]) is already enforced by `Prediction` deserialization.
pub fn validate_create_analysis(req: &CreateAnalysisRequest) -> Result<(), AppError> {
    if req.truck_number.trim().is_empty() {
        return Err(AppError::Validation("Truck number is required".into()));
    }
    if req.scrap_predictions.is_empty() {
        return Err(AppError::Validation(
            "At least one scrap prediction is required".into(),
        ));
    }
    if req.scrap_image.trim().is_empty() || req.plate_image.trim().is_empty() {
        return Err(AppError::Validation("Image references are required".into()));
    }
    Ok(())
}

/// Decode a stored row into the wire record.
///
/// Stored prediction JSON was validated on the way in, so a decode failure
/// here means corrupt data and surfaces as an internal error. Scrap
/// predictions are sorted highest-confidence-first on every read since the
/// store does not enforce the order; plate predictions keep reading order.
pub fn record_from_model(m: analysis::Model) -> Result<AnalysisRecord, AppError> {
    let mut scrap_predictions: Vec<Prediction> = serde_json::from_value(m.scrap_predictions)
        .map_err(|e| AppError::Internal(format!("corrupt scrap predictions: {e}")))?;
    let plate_predictions: Vec<Prediction> = serde_json::from_value(m.plate_predictions)
        .map_err(|e| AppError::Internal(format!("corrupt plate predictions: {e}")))?;
    prediction::sort_by_confidence_desc(&mut scrap_predictions);

    Ok(AnalysisRecord {
        id: m.id,
        factory_id: m.factory_id,
        labourer_id: m.labourer_id,
        owner_id: m.owner_id,
        timestamp: m.timestamp,
        truck_number: m.truck_number,
        scrap_predictions,
        plate_predictions,
        labourer_notes: m.labourer_notes,
        owner_notes: m.owner_notes,
        submitted_to_owner: m.submitted_to_owner,
        submission_timestamp: m.submission_timestamp,
        verification_status: m.verification_status,
        verification_timestamp: m.verification_timestamp,
        predictions_corrected: m.predictions_corrected,
        scrap_image: m.scrap_image,
        plate_image: m.plate_image,
    })
}
