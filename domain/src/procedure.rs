use crate::error::Error;
use crate::procedures::Model;
use crate::Id;
use entity_api::{mutate, procedure, procedures, query, IntoQueryFilterMap};
use sea_orm::{DatabaseConnection, IntoActiveModel};

pub use entity_api::procedure::{create, delete_by_id, find_by_id};

pub async fn find_by(
    db: &DatabaseConnection,
    params: impl IntoQueryFilterMap,
) -> Result<Vec<Model>, Error> {
    let procedures = query::find_by::<procedures::Entity, procedures::Column>(
        db,
        params.into_query_filter_map(),
    )
    .await?;

    Ok(procedures)
}

pub async fn update(
    db: &DatabaseConnection,
    id: Id,
    params: impl mutate::IntoUpdateMap + std::fmt::Debug,
) -> Result<Model, Error> {
    let procedure = procedure::find_by_id(db, id).await?;
    let active_model = procedure.into_active_model();
    Ok(
        mutate::update::<procedures::ActiveModel, procedures::Column>(
            db,
            active_model,
            params.into_update_map(),
        )
        .await?,
    )
}
