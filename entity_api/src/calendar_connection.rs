use super::error::{EntityApiErrorKind, Error};
use entity::calendar_connections::{ActiveModel, Column, Entity, Model};
use entity::provider::Provider;
use entity::Id;
use log::debug;
use sea_orm::{
    entity::prelude::*,
    ActiveValue::{Set, Unchanged},
    DatabaseConnection, TryIntoModel,
};

/// Creates a new calendar connection record
pub async fn create(db: &DatabaseConnection, model: Model) -> Result<Model, Error> {
    debug!(
        "Creating calendar connection for user_id: {}, provider: {}",
        model.user_id, model.provider
    );

    let now = chrono::Utc::now();

    let active_model = ActiveModel {
        user_id: Set(model.user_id),
        provider: Set(model.provider),
        external_email: Set(model.external_email),
        access_token: Set(model.access_token),
        refresh_token: Set(model.refresh_token),
        calendar_id: Set(model.calendar_id),
        token_expires_at: Set(model.token_expires_at),
        token_type: Set(model.token_type),
        scopes: Set(model.scopes),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    };

    Ok(active_model.save(db).await?.try_into_model()?)
}

/// Finds a calendar connection by user ID and provider (unique pair)
pub async fn find_by_user_and_provider(
    db: &DatabaseConnection,
    user_id: Id,
    provider: Provider,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::Provider.eq(provider.to_string()))
        .one(db)
        .await?)
}

/// Updates tokens and calendar id on an existing connection (re-authorization)
pub async fn update_tokens(
    db: &DatabaseConnection,
    id: Id,
    access_token: String,
    refresh_token: Option<String>,
    calendar_id: String,
    token_expires_at: Option<DateTimeUtc>,
) -> Result<Model, Error> {
    let existing = Entity::find_by_id(id).one(db).await?.ok_or(Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })?;

    debug!("Updating calendar connection tokens: {id}");

    let active_model = ActiveModel {
        id: Unchanged(existing.id),
        user_id: Unchanged(existing.user_id),
        provider: Unchanged(existing.provider),
        external_email: Unchanged(existing.external_email),
        access_token: Set(access_token),
        refresh_token: Set(refresh_token),
        calendar_id: Set(calendar_id),
        token_expires_at: Set(token_expires_at.map(|t| t.into())),
        token_type: Unchanged(existing.token_type),
        scopes: Unchanged(existing.scopes),
        created_at: Unchanged(existing.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

/// Updates only the access token after a refresh grant. The refresh token
/// and calendar id are left untouched.
pub async fn update_access_token(
    db: &DatabaseConnection,
    id: Id,
    access_token: String,
    token_expires_at: Option<DateTimeUtc>,
) -> Result<Model, Error> {
    let existing = Entity::find_by_id(id).one(db).await?.ok_or(Error {
        source: None,
        error_kind: EntityApiErrorKind::RecordNotFound,
    })?;

    debug!("Updating calendar connection access token: {id}");

    let active_model = ActiveModel {
        id: Unchanged(existing.id),
        user_id: Unchanged(existing.user_id),
        provider: Unchanged(existing.provider),
        external_email: Unchanged(existing.external_email),
        access_token: Set(access_token),
        refresh_token: Unchanged(existing.refresh_token),
        calendar_id: Unchanged(existing.calendar_id),
        token_expires_at: Set(token_expires_at.map(|t| t.into())),
        token_type: Unchanged(existing.token_type),
        scopes: Unchanged(existing.scopes),
        created_at: Unchanged(existing.created_at),
        updated_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.update(db).await?.try_into_model()?)
}

/// Deletes a calendar connection by user ID and provider (disconnect)
pub async fn delete_by_user_and_provider(
    db: &DatabaseConnection,
    user_id: Id,
    provider: Provider,
) -> Result<(), Error> {
    let connection = find_by_user_and_provider(db, user_id, provider).await?;
    match connection {
        Some(model) => {
            Entity::delete_by_id(model.id).exec(db).await?;
            Ok(())
        }
        None => Err(Error {
            source: None,
            error_kind: EntityApiErrorKind::RecordNotFound,
        }),
    }
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
            provider: Provider::Google,
            external_email: Some("clinic@gmail.com".to_string()),
            access_token: "encrypted-access-token".to_string(),
            refresh_token: Some("encrypted-refresh-token".to_string()),
            calendar_id: "primary-calendar-id".to_string(),
            token_expires_at: Some(now.into()),
            token_type: "Bearer".to_string(),
            scopes: "https://www.googleapis.com/auth/calendar".to_string(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn create_returns_a_new_calendar_connection() -> Result<(), Error> {
        let model = test_model();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();

        let result = create(&db, model.clone()).await?;

        assert_eq!(result.user_id, model.user_id);
        assert_eq!(result.provider, Provider::Google);
        assert_eq!(result.calendar_id, model.calendar_id);

        Ok(())
    }

    #[tokio::test]
    async fn find_by_user_and_provider_returns_none_when_not_found() -> Result<(), Error> {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results::<Model, Vec<Model>, _>(vec![vec![]])
            .into_connection();

        let result = find_by_user_and_provider(&db, Id::new_v4(), Provider::Google).await?;
        assert!(result.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn round_trip_preserves_stored_columns() -> Result<(), Error> {
        let model = test_model();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model.clone()]])
            .append_query_results(vec![vec![model.clone()]])
            .into_connection();

        let written = create(&db, model.clone()).await?;
        let read_back = find_by_user_and_provider(&db, model.user_id, Provider::Google)
            .await?
            .unwrap();

        assert_eq!(written, read_back);
        Ok(())
    }

    #[tokio::test]
    async fn update_tokens_replaces_access_and_refresh_tokens() -> Result<(), Error> {
        let model = test_model();
        let mut updated = model.clone();
        updated.access_token = "new-access-token".to_string();
        updated.refresh_token = Some("new-refresh-token".to_string());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // First query: find_by_id
            .append_query_results(vec![vec![model.clone()]])
            // Second query: update result
            .append_query_results(vec![vec![updated.clone()]])
            .into_connection();

        let result = update_tokens(
            &db,
            model.id,
            "new-access-token".to_string(),
            Some("new-refresh-token".to_string()),
            model.calendar_id.clone(),
            None,
        )
        .await?;

        assert_eq!(result.access_token, "new-access-token");
        assert_eq!(result.refresh_token, Some("new-refresh-token".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn update_access_token_returns_error_when_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results::<Model, Vec<Model>, _>(vec![vec![]])
            .into_connection();

        let result = update_access_token(&db, Id::new_v4(), "token".to_string(), None).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn delete_by_user_and_provider_executes_delete() -> Result<(), Error> {
        let model = test_model();
        let user_id = model.user_id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // First query: find_by_user_and_provider
            .append_query_results(vec![vec![model.clone()]])
            // Second: delete exec result
            .append_exec_results(vec![sea_orm::MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        delete_by_user_and_provider(&db, user_id, Provider::Google).await?;
        Ok(())
    }

    #[tokio::test]
    async fn delete_by_user_and_provider_returns_error_when_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results::<Model, Vec<Model>, _>(vec![vec![]])
            .into_connection();

        let result = delete_by_user_and_provider(&db, Id::new_v4(), Provider::Google).await;
        assert!(result.is_err());
    }
}
