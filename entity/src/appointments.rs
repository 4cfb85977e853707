use crate::appointment_status::AppointmentStatus;
use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize, ToSchema)]
#[sea_orm(schema_name = "clinic_platform", table_name = "appointments")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key)]
    #[schema(value_type = Uuid)]
    pub id: Id,
    #[schema(value_type = Uuid)]
    pub user_id: Id,
    #[schema(value_type = Uuid)]
    pub client_id: Id,
    #[schema(value_type = Option<Uuid>)]
    pub procedure_id: Option<Id>,
    #[schema(value_type = String, format = DateTime)]
    pub scheduled_datetime: DateTimeWithTimeZone,
    /// Length of the appointment. When absent the calendar sync falls back
    /// to a 60 minute default.
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub calendar_synced: bool,
    pub google_event_id: Option<String>,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTimeWithTimeZone,
    #[serde(skip_deserializing)]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::clients::Entity",
        from = "Column::ClientId",
        to = "super::clients::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Clients,
    #[sea_orm(
        belongs_to = "super::procedures::Entity",
        from = "Column::ProcedureId",
        to = "super::procedures::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Procedures,
}

impl Related<super::clients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl Related<super::procedures::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Procedures.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
