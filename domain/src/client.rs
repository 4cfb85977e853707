use crate::clients::Model;
use crate::error::Error;
use crate::Id;
use entity_api::{client, clients, mutate, query, IntoQueryFilterMap};
use sea_orm::{DatabaseConnection, IntoActiveModel};

pub use entity_api::client::{create, delete_by_id, find_by_id};

pub async fn find_by(
    db: &DatabaseConnection,
    params: impl IntoQueryFilterMap,
) -> Result<Vec<Model>, Error> {
    let clients =
        query::find_by::<clients::Entity, clients::Column>(db, params.into_query_filter_map())
            .await?;

    Ok(clients)
}

pub async fn update(
    db: &DatabaseConnection,
    id: Id,
    params: impl mutate::IntoUpdateMap + std::fmt::Debug,
) -> Result<Model, Error> {
    let client = client::find_by_id(db, id).await?;
    let active_model = client.into_active_model();
    Ok(
        mutate::update::<clients::ActiveModel, clients::Column>(
            db,
            active_model,
            params.into_update_map(),
        )
        .await?,
    )
}
