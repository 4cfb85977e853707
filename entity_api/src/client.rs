use super::error::{EntityApiErrorKind, Error};
use entity::clients::{ActiveModel, Entity, Model};
use entity::Id;
use log::debug;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set, TryIntoModel};

pub async fn create(db: &DatabaseConnection, client_model: Model) -> Result<Model, Error> {
    debug!("New Client Model to be inserted: {client_model:?}");

    let now = chrono::Utc::now();

    let client_active_model: ActiveModel = ActiveModel {
        user_id: Set(client_model.user_id),
        name: Set(client_model.name),
        email: Set(client_model.email),
        phone: Set(client_model.phone),
        address: Set(client_model.address),
        notes: Set(client_model.notes),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(client_active_model.save(db).await?.try_into_model()?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

/// Like `find_by_id` but a missing record is not an error. The calendar
/// sync treats an absent client as non-fatal.
pub async fn find_by_id_opt(db: &DatabaseConnection, id: Id) -> Result<Option<Model>, Error> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let client = find_by_id(db, id).await?;
    Entity::delete_by_id(client.id).exec(db).await?;
    Ok(())
}
