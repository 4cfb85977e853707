use chrono::{DateTime, FixedOffset};
use domain::appointment_status::AppointmentStatus;
use domain::Id;
use domain::{IntoQueryFilterMap, IntoUpdateMap, QueryFilterMap, UpdateMap};
use sea_orm::Value;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct IndexParams {
    #[param(value_type = Uuid)]
    pub(crate) user_id: Id,
    #[param(value_type = Option<Uuid>)]
    pub(crate) client_id: Option<Id>,
    pub(crate) calendar_synced: Option<bool>,
}

impl IntoQueryFilterMap for IndexParams {
    fn into_query_filter_map(self) -> QueryFilterMap {
        let mut query_filter_map = QueryFilterMap::new();
        query_filter_map.insert(
            "user_id".to_string(),
            Some(Value::Uuid(Some(Box::new(self.user_id)))),
        );
        if let Some(client_id) = self.client_id {
            query_filter_map.insert(
                "client_id".to_string(),
                Some(Value::Uuid(Some(Box::new(client_id)))),
            );
        }
        if let Some(calendar_synced) = self.calendar_synced {
            query_filter_map.insert(
                "calendar_synced".to_string(),
                Some(Value::Bool(Some(calendar_synced))),
            );
        }
        query_filter_map
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct UpdateParams {
    #[schema(value_type = Option<String>, format = DateTime)]
    pub(crate) scheduled_datetime: Option<DateTime<FixedOffset>>,
    pub(crate) duration_minutes: Option<i32>,
    pub(crate) notes: Option<String>,
    pub(crate) status: Option<AppointmentStatus>,
    #[schema(value_type = Option<Uuid>)]
    pub(crate) procedure_id: Option<Id>,
}

impl IntoUpdateMap for UpdateParams {
    fn into_update_map(self) -> UpdateMap {
        let mut update_map = UpdateMap::new();
        if let Some(scheduled_datetime) = self.scheduled_datetime {
            update_map.insert(
                "scheduled_datetime".to_string(),
                Some(Value::ChronoDateTimeWithTimeZone(Some(Box::new(
                    scheduled_datetime,
                )))),
            );
        }
        if let Some(duration_minutes) = self.duration_minutes {
            update_map.insert(
                "duration_minutes".to_string(),
                Some(Value::Int(Some(duration_minutes))),
            );
        }
        if let Some(notes) = self.notes {
            update_map.insert(
                "notes".to_string(),
                Some(Value::String(Some(Box::new(notes)))),
            );
        }
        if let Some(status) = self.status {
            update_map.insert(
                "status".to_string(),
                Some(Value::String(Some(Box::new(status.to_string())))),
            );
        }
        if let Some(procedure_id) = self.procedure_id {
            update_map.insert(
                "procedure_id".to_string(),
                Some(Value::Uuid(Some(Box::new(procedure_id)))),
            );
        }
        update_map
    }
}
