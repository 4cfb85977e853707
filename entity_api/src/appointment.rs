use super::error::{EntityApiErrorKind, Error};
use entity::appointments::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::debug;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, QueryOrder, TryIntoModel,
};

pub async fn create(db: &DatabaseConnection, appointment_model: Model) -> Result<Model, Error> {
    debug!("New Appointment Model to be inserted: {appointment_model:?}");

    let now = chrono::Utc::now();

    let appointment_active_model: ActiveModel = ActiveModel {
        user_id: Set(appointment_model.user_id),
        client_id: Set(appointment_model.client_id),
        procedure_id: Set(appointment_model.procedure_id),
        scheduled_datetime: Set(appointment_model.scheduled_datetime),
        duration_minutes: Set(appointment_model.duration_minutes),
        notes: Set(appointment_model.notes),
        status: Set(appointment_model.status),
        // New appointments always start out unsynced; the next sync batch
        // picks them up.
        calendar_synced: Set(false),
        google_event_id: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(appointment_active_model.save(db).await?.try_into_model()?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// All of a user's appointments, newest first. The sync status endpoint
/// derives its counts from this set.
pub async fn find_by_user(db: &DatabaseConnection, user_id: Id) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::ScheduledDatetime)
        .all(db)
        .await?)
}

/// Exactly the appointments with `calendar_synced = false` for the user,
/// oldest scheduled first so events land in calendar order.
pub async fn find_unsynced_by_user(
    db: &DatabaseConnection,
    user_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::CalendarSynced.eq(false))
        .order_by_asc(Column::ScheduledDatetime)
        .all(db)
        .await?)
}

/// Flags an appointment as synchronized and records the provider-side
/// event id that backs it.
pub async fn mark_synced(
    db: &DatabaseConnection,
    id: Id,
    google_event_id: String,
) -> Result<Model, Error> {
    let existing = find_by_id(db, id).await?;

    debug!("Marking appointment {id} synced with event {google_event_id}");

    let active_model = ActiveModel {
        id: Unchanged(existing.id),
        user_id: Unchanged(existing.user_id),
        client_id: Unchanged(existing.client_id),
        procedure_id: Unchanged(existing.procedure_id),
        scheduled_datetime: Unchanged(existing.scheduled_datetime),
        duration_minutes: Unchanged(existing.duration_minutes),
        notes: Unchanged(existing.notes),
        status: Unchanged(existing.status),
        calendar_synced: Set(true),
        google_event_id: Set(Some(google_event_id)),
        created_at: Unchanged(existing.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let appointment = find_by_id(db, id).await?;
    Entity::delete_by_id(appointment.id).exec(db).await?;
    Ok(())
}
