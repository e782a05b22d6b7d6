use common::VerificationStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "analysis")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub truck_number: String,

    /// Scrap-type predictions stored as a JSON array of {class, confidence}.
    #[sea_orm(column_type = "JsonBinary")]
    pub scrap_predictions: serde_json::Value,
    /// Plate-text predictions, same shape, in plate reading order.
    #[sea_orm(column_type = "JsonBinary")]
    pub plate_predictions: serde_json::Value,

    /// Opaque stored-image references; image processing happens elsewhere.
    pub scrap_image: String,
    pub plate_image: String,

    pub labourer_id: i32,
    #[sea_orm(belongs_to, from = "labourer_id", to = "id")]
    pub labourer: HasOne<super::user::Entity>,

    pub factory_id: i32,
    #[sea_orm(belongs_to, from = "factory_id", to = "id")]
    pub factory: HasOne<super::factory::Entity>,

    /// Resolved from the factory when the record is submitted.
    pub owner_id: Option<i32>,

    pub labourer_notes: Option<String>,
    pub owner_notes: Option<String>,

    pub submitted_to_owner: bool,
    /// Set exactly once, together with submitted_to_owner.
    pub submission_timestamp: Option<DateTimeUtc>,
    /// NULL until submitted; terminal values never change back.
    pub verification_status: Option<VerificationStatus>,
    /// Set exactly once, together with a terminal status.
    pub verification_timestamp: Option<DateTimeUtc>,
    pub predictions_corrected: bool,

    /// Analysis (creation) time.
    pub timestamp: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
