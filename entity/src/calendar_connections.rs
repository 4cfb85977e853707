use crate::provider::Provider;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-user external calendar credentials, one row per (user, provider).
///
/// `access_token` and `refresh_token` hold AES-256-GCM ciphertext produced
/// by `domain::encryption`; they are never serialized out to clients.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[sea_orm(schema_name = "clinic_platform", table_name = "calendar_connections")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    #[schema(value_type = Uuid)]
    pub id: Id,
    #[schema(value_type = Uuid)]
    pub user_id: Id,
    pub provider: Provider,
    pub external_email: Option<String>,
    #[serde(skip_serializing)]
    pub access_token: String,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    /// The provider-side calendar events are written into (the user's
    /// primary calendar id at connect time).
    pub calendar_id: String,
    #[schema(value_type = Option<String>, format = DateTime)]
    pub token_expires_at: Option<DateTimeWithTimeZone>,
    pub token_type: String,
    pub scopes: String,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
