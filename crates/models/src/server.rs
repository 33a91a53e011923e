use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// The only log format servers may declare.
pub const LOG_FORMAT_JSON: &str = "json";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "servers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub host: String,
    pub log_location_path: String,
    pub log_location_format: String,
    /// References `credentials.id`; existence is enforced by the service layer.
    pub credential_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
