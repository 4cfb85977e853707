use super::error::Error;
use entity::sync_events::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::debug;
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, QuerySelect, Set, TryIntoModel};

/// Appends one row to the sync event log. Rows are never updated or
/// deleted through this API.
pub async fn create(db: &DatabaseConnection, model: Model) -> Result<Model, Error> {
    debug!(
        "Recording sync {} for appointment {}",
        model.outcome, model.appointment_id
    );

    let active_model = ActiveModel {
        user_id: Set(model.user_id),
        appointment_id: Set(model.appointment_id),
        google_event_id: Set(model.google_event_id),
        outcome: Set(model.outcome),
        error_detail: Set(model.error_detail),
        created_at: Set(chrono::Utc::now().into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// The newest `limit` log rows for a user, most recent first.
pub async fn find_recent_by_user(
    db: &DatabaseConnection,
    user_id: Id,
    limit: u64,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await?)
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use entity::sync_outcome::SyncOutcome;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_model(outcome: SyncOutcome) -> Model {
        let now = chrono::Utc::now();
        Model {
            id: Id::new_v4(),
            user_id: Id::new_v4(),
            appointment_id: Id::new_v4(),
            google_event_id: matches!(outcome, SyncOutcome::Success).then(|| "evt-1".to_string()),
            outcome,
            error_detail: matches!(outcome, SyncOutcome::Failure)
                .then(|| "provider rejected the event".to_string()),
            created_at: now.into(),
        }
    }

    #[tokio::test]
    async fn create_appends_a_success_row() -> Result<(), Error> {
        let model = test_model(SyncOutcome::Success);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();

        let result = create(&db, model.clone()).await?;

        assert_eq!(result.outcome, SyncOutcome::Success);
        assert_eq!(result.google_event_id, Some("evt-1".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn create_appends_a_failure_row_with_detail() -> Result<(), Error> {
        let model = test_model(SyncOutcome::Failure);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();

        let result = create(&db, model.clone()).await?;

        assert_eq!(result.outcome, SyncOutcome::Failure);
        assert!(result.error_detail.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn find_recent_by_user_returns_rows() -> Result<(), Error> {
        let newer = test_model(SyncOutcome::Success);
        let older = test_model(SyncOutcome::Failure);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![newer.clone(), older.clone()]])
            .into_connection();

        let results = find_recent_by_user(&db, newer.user_id, 10).await?;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, newer.id);
        Ok(())
    }
}
