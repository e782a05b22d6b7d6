pub mod analysis;
pub mod labourer;
pub mod owner;

use common::Prediction;
use sea_orm::ConnectionTrait;
use sea_orm::EntityTrait;

use crate::entity::analysis as analysis_entity;
use crate::error::AppError;

/// Find an analysis by ID or return 404.
pub(crate) async fn find_analysis<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<analysis_entity::Model, AppError> {
    analysis_entity::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Analysis not found".into()))
}

/// Encode predictions for JSON column storage.
pub(crate) fn predictions_json(predictions: &[Prediction]) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(predictions)
        .map_err(|e| AppError::Internal(format!("failed to encode predictions: {e}")))
}
