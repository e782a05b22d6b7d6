use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A factory user. Authentication lives in an external service; this table
/// carries the identity the verification workflow joins against.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub employee_id: String,
    /// "labourer" or "owner".
    pub role: String,
    pub factory_id: Option<i32>,

    #[sea_orm(has_many)]
    pub analyses: HasMany<super::analysis::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
