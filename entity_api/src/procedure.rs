use super::error::{EntityApiErrorKind, Error};
use entity::procedures::{ActiveModel, Entity, Model};
use entity::Id;
use log::debug;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set, TryIntoModel};

pub async fn create(db: &DatabaseConnection, procedure_model: Model) -> Result<Model, Error> {
    debug!("New Procedure Model to be inserted: {procedure_model:?}");

    let now = chrono::Utc::now();

    let procedure_active_model: ActiveModel = ActiveModel {
        user_id: Set(procedure_model.user_id),
        name: Set(procedure_model.name),
        description: Set(procedure_model.description),
        price_cents: Set(procedure_model.price_cents),
        duration_minutes: Set(procedure_model.duration_minutes),
        is_active: Set(procedure_model.is_active),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(procedure_active_model.save(db).await?.try_into_model()?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: Id) -> Result<Model, Error> {
    Entity::find_by_id(id).one(db).await?.ok_or_else(|| Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })
}

pub async fn delete_by_id(db: &DatabaseConnection, id: Id) -> Result<(), Error> {
    let procedure = find_by_id(db, id).await?;
    Entity::delete_by_id(procedure.id).exec(db).await?;
    Ok(())
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_model() -> Model {
        let now = chrono::Utc::now();
        Model {
            id: Id::new_v4(),
            user_id: Id::new_v4(),
            name: "Limpeza de Pele".to_string(),
            description: None,
            price_cents: 18_000,
            duration_minutes: 90,
            is_active: true,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn create_returns_a_new_procedure_model() -> Result<(), Error> {
        let model = test_model();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();

        let procedure = create(&db, model.clone()).await?;

        assert_eq!(procedure.id, model.id);
        assert_eq!(procedure.price_cents, 18_000);

        Ok(())
    }

    #[tokio::test]
    async fn find_by_id_returns_error_when_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results::<Model, Vec<Model>, _>(vec![vec![]])
            .into_connection();

        let result = find_by_id(&db, Id::new_v4()).await;
        assert!(result.is_err());
    }
}
