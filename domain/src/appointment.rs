use crate::appointments::Model;
use crate::error::{DomainErrorKind, Error, InternalErrorKind};
use crate::Id;
use chrono::{DurationRound, TimeDelta};
use entity_api::{appointment, appointments, mutate, query, IntoQueryFilterMap};
use log::*;
use sea_orm::{DatabaseConnection, IntoActiveModel, Value};

pub use entity_api::appointment::{delete_by_id, find_by_id, find_by_user, find_unsynced_by_user};

pub async fn create(
    db: &DatabaseConnection,
    mut appointment_model: Model,
) -> Result<Model, Error> {
    // Remove seconds because all appointments are scheduled by the minute.
    let scheduled = appointment_model
        .scheduled_datetime
        .duration_trunc(TimeDelta::minutes(1))
        .map_err(|err| {
            warn!("Failed to truncate scheduled_datetime: {:?}", err);
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to truncate scheduled_datetime".to_string(),
                )),
            }
        })?;
    appointment_model.scheduled_datetime = scheduled;

    Ok(appointment::create(db, appointment_model).await?)
}

pub async fn find_by(
    db: &DatabaseConnection,
    params: impl IntoQueryFilterMap,
) -> Result<Vec<Model>, Error> {
    let appointments = query::find_by::<appointments::Entity, appointments::Column>(
        db,
        params.into_query_filter_map(),
    )
    .await?;

    Ok(appointments)
}

pub async fn update(
    db: &DatabaseConnection,
    id: Id,
    params: impl mutate::IntoUpdateMap + std::fmt::Debug,
) -> Result<Model, Error> {
    let appointment_model = appointment::find_by_id(db, id).await?;
    let active_model = appointment_model.into_active_model();

    let mut update_map = params.into_update_map();
    // Rescheduling invalidates the provider-side event; flag the record for
    // the next sync batch.
    if update_map.get("scheduled_datetime").is_some() {
        update_map.insert(
            "calendar_synced".to_string(),
            Some(Value::Bool(Some(false))),
        );
        update_map.insert("google_event_id".to_string(), Some(Value::String(None)));
    }

    Ok(
        mutate::update::<appointments::ActiveModel, appointments::Column>(
            db,
            active_model,
            update_map,
        )
        .await?,
    )
}
