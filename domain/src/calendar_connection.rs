use crate::calendar_connections::Model as CalendarConnectionModel;
use crate::encryption;
use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use crate::gateway::google_calendar::{
    GoogleCalendarClient, GoogleOAuthClient, GoogleOAuthUrls, CALENDAR_SCOPES,
};
use crate::provider::Provider;
use crate::Id;
use chrono::{Duration, Utc};
use entity_api::calendar_connection;
use log::*;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use service::config::Config;

pub use entity_api::calendar_connection::find_by_user_and_provider;

/// Access tokens within this many seconds of expiry are refreshed before
/// use rather than handed to the Calendar API.
const TOKEN_EXPIRY_SKEW_SECS: i64 = 60;

/// Decrypted, ready-to-use credentials for one user's calendar.
#[derive(Debug)]
pub struct ActiveConnection {
    pub connection_id: Id,
    pub access_token: String,
    pub calendar_id: String,
}

/// Connection state reported to the frontend. Never carries tokens.
#[derive(Debug, Serialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub external_email: Option<String>,
    pub calendar_id: Option<String>,
}

/// Build the Google OAuth authorization URL for a user.
pub fn google_authorize_url(config: &Config, user_id: Id) -> Result<String, Error> {
    let client_id = config.google_client_id().ok_or_else(|| Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
    })?;

    let redirect_uri = config.google_redirect_uri().ok_or_else(|| Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
    })?;

    // The client secret is not needed to build the consent URL.
    let oauth = GoogleOAuthClient::new(&client_id, "", &redirect_uri, oauth_urls(config))?;
    let state = user_id.to_string();
    let url = oauth.authorization_url(&CALENDAR_SCOPES, &state);

    info!("Redirecting user {} to Google OAuth", user_id);
    Ok(url)
}

/// Exchange an authorization code for tokens and store them in calendar_connections.
///
/// The store write is the final step: a failure anywhere leaves no partial
/// credential behind, and a failed write fails the whole exchange even
/// though tokens were already obtained.
///
/// Returns the success redirect URL for the frontend.
pub async fn exchange_and_store_tokens(
    db: &DatabaseConnection,
    config: &Config,
    user_id: Id,
    authorization_code: &str,
) -> Result<String, Error> {
    info!("Processing Google OAuth callback for user {}", user_id);

    let encryption_key = config.encryption_key().ok_or_else(|| Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
    })?;

    let oauth = create_oauth_client(config)?;

    let tokens = oauth
        .exchange_code(authorization_code)
        .await
        .inspect_err(|e| {
            warn!(
                "Failed to exchange OAuth code for user {}: {:?}",
                user_id, e
            )
        })?;

    let calendar_api = GoogleCalendarClient::new(&tokens.access_token, config.google_calendar_base_url())?;
    let primary = calendar_api.primary_calendar().await.inspect_err(|e| {
        warn!(
            "Failed to look up primary calendar for user {}: {:?}",
            user_id, e
        )
    })?;

    let encrypted_access = encryption::encrypt(&tokens.access_token, &encryption_key)?;
    let encrypted_refresh = tokens
        .refresh_token
        .as_deref()
        .map(|rt| encryption::encrypt(rt, &encryption_key))
        .transpose()?;
    let expires_at = Utc::now() + Duration::seconds(tokens.expires_in);

    let existing = calendar_connection::find_by_user_and_provider(db, user_id, Provider::Google)
        .await?;

    match existing {
        Some(conn) => {
            calendar_connection::update_tokens(
                db,
                conn.id,
                encrypted_access,
                encrypted_refresh,
                primary.id,
                Some(expires_at),
            )
            .await?;
        }
        None => {
            let now = Utc::now();
            let model = CalendarConnectionModel {
                id: Id::new_v4(),
                user_id,
                provider: Provider::Google,
                external_email: None,
                access_token: encrypted_access,
                refresh_token: encrypted_refresh,
                calendar_id: primary.id,
                token_expires_at: Some(expires_at.into()),
                token_type: tokens.token_type,
                scopes: CALENDAR_SCOPES.join(" "),
                created_at: now.into(),
                updated_at: now.into(),
            };
            calendar_connection::create(db, model).await?;
        }
    }

    info!(
        "Successfully stored Google Calendar credentials for user {}",
        user_id
    );

    let base_url = config.google_oauth_redirect_back_url();
    Ok(format!("{}?success=google_connected", base_url))
}

/// Remove a user's Google Calendar connection.
pub async fn disconnect(db: &DatabaseConnection, user_id: Id) -> Result<(), Error> {
    calendar_connection::delete_by_user_and_provider(db, user_id, Provider::Google).await?;
    info!("Disconnected Google Calendar for user {}", user_id);
    Ok(())
}

/// Report whether a user has a usable calendar connection.
pub async fn status(db: &DatabaseConnection, user_id: Id) -> Result<ConnectionStatus, Error> {
    let connection =
        calendar_connection::find_by_user_and_provider(db, user_id, Provider::Google).await?;

    Ok(match connection {
        Some(conn) if !conn.access_token.is_empty() && !conn.calendar_id.is_empty() => {
            ConnectionStatus {
                connected: true,
                external_email: conn.external_email,
                calendar_id: Some(conn.calendar_id),
            }
        }
        _ => ConnectionStatus {
            connected: false,
            external_email: None,
            calendar_id: None,
        },
    })
}

/// Resolve a decrypted, non-expired access token plus the calendar id for a
/// user. When the stored token is expired (or about to expire) and a
/// refresh token exists, a refresh grant runs and the renewed token is
/// persisted before it is returned.
pub async fn active_connection(
    db: &DatabaseConnection,
    config: &Config,
    user_id: Id,
) -> Result<ActiveConnection, Error> {
    let encryption_key = config.encryption_key().ok_or_else(|| Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
    })?;

    let connection =
        calendar_connection::find_by_user_and_provider(db, user_id, Provider::Google)
            .await?
            .ok_or_else(|| {
                warn!("User {} has no Google Calendar connection", user_id);
                Error {
                    source: None,
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                        crate::error::EntityErrorKind::NotFound,
                    )),
                }
            })?;

    let expired = connection
        .token_expires_at
        .map(|at| at < Utc::now() + Duration::seconds(TOKEN_EXPIRY_SKEW_SECS))
        .unwrap_or(false);

    if expired && connection.refresh_token.is_some() {
        debug!("Stored access token for user {} is expired", user_id);
        let access_token = refresh_access_token(db, config, user_id).await?;
        return Ok(ActiveConnection {
            connection_id: connection.id,
            access_token,
            calendar_id: connection.calendar_id,
        });
    }

    let access_token = encryption::decrypt(&connection.access_token, &encryption_key)?;

    Ok(ActiveConnection {
        connection_id: connection.id,
        access_token,
        calendar_id: connection.calendar_id,
    })
}

/// Run a refresh grant for a user's connection and persist the renewed
/// access token. Returns the new token in plaintext.
pub async fn refresh_access_token(
    db: &DatabaseConnection,
    config: &Config,
    user_id: Id,
) -> Result<String, Error> {
    let encryption_key = config.encryption_key().ok_or_else(|| Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
    })?;

    let connection =
        calendar_connection::find_by_user_and_provider(db, user_id, Provider::Google)
            .await?
            .ok_or_else(|| Error {
                source: None,
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(
                    crate::error::EntityErrorKind::NotFound,
                )),
            })?;

    let encrypted_refresh = connection.refresh_token.as_deref().ok_or_else(|| {
        warn!(
            "User {} has no refresh token; re-authorization required",
            user_id
        );
        Error {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Unauthorized),
        }
    })?;
    let refresh_token = encryption::decrypt(encrypted_refresh, &encryption_key)?;

    let oauth = create_oauth_client(config)?;
    let tokens = oauth
        .refresh_token(&refresh_token)
        .await
        .inspect_err(|e| warn!("Failed to refresh token for user {}: {:?}", user_id, e))?;

    let encrypted_access = encryption::encrypt(&tokens.access_token, &encryption_key)?;
    let expires_at = Utc::now() + Duration::seconds(tokens.expires_in);

    calendar_connection::update_access_token(
        db,
        connection.id,
        encrypted_access,
        Some(expires_at),
    )
    .await?;

    info!("Refreshed Google access token for user {}", user_id);
    Ok(tokens.access_token)
}

/// Create a Google OAuth client from config.
fn create_oauth_client(config: &Config) -> Result<GoogleOAuthClient, Error> {
    let client_id = config.google_client_id().ok_or_else(|| Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
    })?;

    let client_secret = config.google_client_secret().ok_or_else(|| Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
    })?;

    let redirect_uri = config.google_redirect_uri().ok_or_else(|| Error {
        source: None,
        error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
    })?;

    GoogleOAuthClient::new(&client_id, &client_secret, &redirect_uri, oauth_urls(config))
}

fn oauth_urls(config: &Config) -> GoogleOAuthUrls {
    GoogleOAuthUrls {
        auth_url: config.google_auth_url().to_string(),
        token_url: config.google_token_url().to_string(),
    }
}

#[cfg(test)]
// We need to gate seaORM's mock feature behind conditional compilation because
// the feature removes the Clone trait implementation from seaORM's DatabaseConnection.
// see https://github.com/SeaQL/sea-orm/issues/830
#[cfg(feature = "mock")]
mod tests {
    use super::*;
    use clap::Parser;
    use sea_orm::{DatabaseBackend, MockDatabase};

    const TEST_KEY: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    fn test_config(server_url: &str) -> Config {
        let auth_url = format!("{server_url}/auth");
        let token_url = format!("{server_url}/token");
        Config::parse_from([
            "clinic_platform_rs",
            "--google-client-id",
            "test-client-id",
            "--google-client-secret",
            "test-client-secret",
            "--google-redirect-uri",
            "http://localhost:4000/oauth/google/callback",
            "--google-auth-url",
            auth_url.as_str(),
            "--google-token-url",
            token_url.as_str(),
            "--google-calendar-base-url",
            server_url,
            "--encryption-key",
            TEST_KEY,
        ])
    }

    fn stored_connection(user_id: Id) -> CalendarConnectionModel {
        let now = Utc::now();
        CalendarConnectionModel {
            id: Id::new_v4(),
            user_id,
            provider: Provider::Google,
            external_email: None,
            access_token: encryption::encrypt("stored-access-token", TEST_KEY).unwrap(),
            refresh_token: Some(encryption::encrypt("stored-refresh-token", TEST_KEY).unwrap()),
            calendar_id: "primary-calendar".to_string(),
            token_expires_at: Some((now + Duration::hours(1)).into()),
            token_type: "Bearer".to_string(),
            scopes: CALENDAR_SCOPES.join(" "),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[test]
    fn google_authorize_url_carries_user_id_as_state() {
        let config = test_config("https://example.test");
        let user_id = Id::new_v4();

        let url = google_authorize_url(&config, user_id).unwrap();

        assert!(url.starts_with("https://example.test/auth?"));
        assert!(url.contains(&format!("state={user_id}")));
        assert!(url.contains("access_type=offline"));
    }

    #[test]
    fn google_authorize_url_fails_without_client_id() {
        let config = Config::parse_from(["clinic_platform_rs"]);
        let result = google_authorize_url(&config, Id::new_v4());

        assert!(matches!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Config)
        ));
    }

    #[tokio::test]
    async fn rejected_exchange_code_never_writes_to_the_store() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(r#"{"error": "invalid_grant"}"#)
            .create_async()
            .await;

        let config = test_config(&server.url());
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = exchange_and_store_tokens(&db, &config, Id::new_v4(), "bad-code").await;

        assert!(result.is_err());
        // The exchange failed before any persistence, so the transaction log
        // must be empty.
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn failed_calendar_lookup_never_writes_to_the_store() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"access_token": "access-123", "refresh_token": "refresh-456", "expires_in": 3599, "token_type": "Bearer"}"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/calendars/primary")
            .with_status(404)
            .with_body(r#"{"error": "not found"}"#)
            .create_async()
            .await;

        let config = test_config(&server.url());
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let result = exchange_and_store_tokens(&db, &config, Id::new_v4(), "auth-code").await;

        assert!(result.is_err());
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn successful_exchange_stores_a_new_connection() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"access_token": "access-123", "refresh_token": "refresh-456", "expires_in": 3599, "token_type": "Bearer"}"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/calendars/primary")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "primary-calendar", "summary": "Clinic"}"#)
            .create_async()
            .await;

        let config = test_config(&server.url());
        let user_id = Id::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // No existing connection for (user, google)
            .append_query_results::<CalendarConnectionModel, Vec<CalendarConnectionModel>, _>(
                vec![vec![]],
            )
            // Insert result
            .append_query_results(vec![vec![stored_connection(user_id)]])
            .into_connection();

        let redirect = exchange_and_store_tokens(&db, &config, user_id, "auth-code")
            .await
            .unwrap();

        assert!(redirect.ends_with("?success=google_connected"));
        // One select plus one insert reached the database.
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[tokio::test]
    async fn active_connection_decrypts_stored_token() {
        let config = test_config("https://example.test");
        let user_id = Id::new_v4();
        let connection = stored_connection(user_id);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![connection.clone()]])
            .into_connection();

        let active = active_connection(&db, &config, user_id).await.unwrap();

        assert_eq!(active.access_token, "stored-access-token");
        assert_eq!(active.calendar_id, "primary-calendar");
        assert_eq!(active.connection_id, connection.id);
    }

    #[tokio::test]
    async fn active_connection_refreshes_expired_token() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"access_token": "fresh-access", "expires_in": 3599, "token_type": "Bearer"}"#,
            )
            .create_async()
            .await;

        let config = test_config(&server.url());
        let user_id = Id::new_v4();
        let mut connection = stored_connection(user_id);
        connection.token_expires_at = Some((Utc::now() - Duration::hours(1)).into());

        let mut refreshed = connection.clone();
        refreshed.access_token = encryption::encrypt("fresh-access", TEST_KEY).unwrap();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // active_connection: find_by_user_and_provider
            .append_query_results(vec![vec![connection.clone()]])
            // refresh_access_token: find_by_user_and_provider
            .append_query_results(vec![vec![connection.clone()]])
            // update_access_token: find_by_id
            .append_query_results(vec![vec![connection.clone()]])
            // update_access_token: update result
            .append_query_results(vec![vec![refreshed]])
            .into_connection();

        let active = active_connection(&db, &config, user_id).await.unwrap();

        assert_eq!(active.access_token, "fresh-access");
    }

    #[tokio::test]
    async fn active_connection_errors_when_not_connected() {
        let config = test_config("https://example.test");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results::<CalendarConnectionModel, Vec<CalendarConnectionModel>, _>(
                vec![vec![]],
            )
            .into_connection();

        let result = active_connection(&db, &config, Id::new_v4()).await;

        assert!(matches!(
            result.unwrap_err().error_kind,
            DomainErrorKind::Internal(InternalErrorKind::Entity(
                crate::error::EntityErrorKind::NotFound
            ))
        ));
    }

    #[tokio::test]
    async fn status_reports_connected_with_calendar_id() {
        let user_id = Id::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored_connection(user_id)]])
            .into_connection();

        let status = status(&db, user_id).await.unwrap();

        assert!(status.connected);
        assert_eq!(status.calendar_id, Some("primary-calendar".to_string()));
    }

    #[tokio::test]
    async fn status_reports_disconnected_when_no_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results::<CalendarConnectionModel, Vec<CalendarConnectionModel>, _>(
                vec![vec![]],
            )
            .into_connection();

        let status = status(&db, Id::new_v4()).await.unwrap();

        assert!(!status.connected);
    }
}
