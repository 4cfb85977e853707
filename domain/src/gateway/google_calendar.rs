//! Google OAuth and Calendar API client.
//!
//! This module provides HTTP clients for the Google OAuth token endpoints
//! and the Google Calendar v3 API. The OAuth client handles the
//! authorization-code exchange and refresh grants; the calendar client
//! performs event create/update/delete against a user's calendar.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use log::*;
use serde::{Deserialize, Serialize};

/// Scopes requested when connecting a Google Calendar.
pub const CALENDAR_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/calendar",
    "https://www.googleapis.com/auth/calendar.events",
];

/// OAuth token response from Google
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
}

/// Request to exchange authorization code for tokens
#[derive(Debug, Serialize)]
struct TokenExchangeRequest {
    code: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    grant_type: String,
}

/// Request to refresh access token
#[derive(Debug, Serialize)]
struct TokenRefreshRequest {
    refresh_token: String,
    client_id: String,
    client_secret: String,
    grant_type: String,
}

/// A calendar as reported by the Calendar API.
#[derive(Debug, Deserialize)]
pub struct CalendarInfo {
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(rename = "timeZone", default)]
    pub time_zone: String,
}

/// Start or end of an event in the Calendar v3 wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDateTime {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "timeZone", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// An event attendee, identified by email only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttendee {
    pub email: String,
}

/// Body for an event insert. Mirrors the subset of the Calendar v3 event
/// resource this platform writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub summary: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<EventAttendee>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub location: String,
}

/// Body for an event patch; only fields present are changed remotely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CalendarEventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<EventAttendee>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Event as returned by the Calendar API after a write.
#[derive(Debug, Deserialize)]
pub struct CreatedEvent {
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(rename = "htmlLink", default)]
    pub html_link: String,
}

/// Configuration for Google OAuth URLs
#[derive(Debug, Clone)]
pub struct GoogleOAuthUrls {
    pub auth_url: String,
    pub token_url: String,
}

/// Google OAuth client for the calendar integration
pub struct GoogleOAuthClient {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    urls: GoogleOAuthUrls,
}

impl GoogleOAuthClient {
    /// Create a new Google OAuth client with configurable URLs
    pub fn new(
        client_id: &str,
        client_secret: &str,
        redirect_uri: &str,
        urls: GoogleOAuthUrls,
    ) -> Result<Self, Error> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_uri: redirect_uri.to_string(),
            urls,
        })
    }

    /// Generate the OAuth authorization URL for user consent.
    ///
    /// Deterministic, no side effects. `access_type=offline` together with
    /// `prompt=consent` makes Google issue a refresh token on every
    /// authorization, not only the first one.
    pub fn authorization_url(&self, scopes: &[&str], state: &str) -> String {
        let scopes = scopes.join(" ");

        format!(
            "{}?\
            client_id={}&\
            redirect_uri={}&\
            response_type=code&\
            scope={}&\
            access_type=offline&\
            prompt=consent&\
            state={}",
            self.urls.auth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&scopes),
            urlencoding::encode(state)
        )
    }

    /// Exchange authorization code for access and refresh tokens
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, Error> {
        let request = TokenExchangeRequest {
            code: code.to_string(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            redirect_uri: self.redirect_uri.clone(),
            grant_type: "authorization_code".to_string(),
        };

        debug!("Exchanging Google OAuth code for tokens");

        let response = self
            .client
            .post(&self.urls.token_url)
            .form(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to exchange Google OAuth code: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        if response.status().is_success() {
            let tokens: TokenResponse = response.json().await.map_err(|e| {
                warn!("Failed to parse Google token response: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                        "Invalid response from Google OAuth".to_string(),
                    )),
                }
            })?;
            info!("Successfully exchanged Google OAuth code for tokens");
            Ok(tokens)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Google OAuth error: {}", error_text);
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Other(error_text)),
            })
        }
    }

    /// Refresh an expired access token using the refresh token
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, Error> {
        let request = TokenRefreshRequest {
            refresh_token: refresh_token.to_string(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            grant_type: "refresh_token".to_string(),
        };

        debug!("Refreshing Google access token");

        let response = self
            .client
            .post(&self.urls.token_url)
            .form(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to refresh Google token: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        if response.status().is_success() {
            let tokens: TokenResponse = response.json().await.map_err(|e| {
                warn!("Failed to parse Google token refresh response: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                        "Invalid response from Google OAuth".to_string(),
                    )),
                }
            })?;
            info!("Successfully refreshed Google access token");
            Ok(tokens)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Google token refresh error: {}", error_text);
            Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Other(error_text)),
            })
        }
    }
}

/// Google Calendar API client scoped to one access token.
///
/// Every method is a single request/response round trip. There is no retry
/// and no token refresh here; callers obtain a valid token first and react
/// to `Unauthorized` themselves.
pub struct GoogleCalendarClient {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleCalendarClient {
    /// Create a new Calendar client with the given access token and base URL
    pub fn new(access_token: &str, base_url: &str) -> Result<Self, Error> {
        let mut headers = reqwest::header::HeaderMap::new();

        let auth_value = format!("Bearer {}", access_token);
        let mut header_value =
            reqwest::header::HeaderValue::from_str(&auth_value).map_err(|e| {
                warn!("Failed to create auth header: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                        "Invalid access token format".to_string(),
                    )),
                }
            })?;
        header_value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, header_value);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Fetch the user's primary calendar
    pub async fn primary_calendar(&self) -> Result<CalendarInfo, Error> {
        let url = format!("{}/calendars/primary", self.base_url);

        debug!("Fetching primary Google calendar");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Failed to fetch primary calendar: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        })?;

        if response.status().is_success() {
            let calendar: CalendarInfo = response.json().await.map_err(|e| {
                warn!("Failed to parse calendar response: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                        "Invalid response from Google Calendar API".to_string(),
                    )),
                }
            })?;
            info!("Primary calendar found: {}", calendar.id);
            Ok(calendar)
        } else {
            Err(remote_error(response).await)
        }
    }

    /// Create an event on the given calendar
    pub async fn create_event(
        &self,
        calendar_id: &str,
        event: &CalendarEvent,
    ) -> Result<CreatedEvent, Error> {
        let url = format!(
            "{}/calendars/{}/events?sendUpdates=all",
            self.base_url,
            urlencoding::encode(calendar_id)
        );

        debug!("Creating Google Calendar event: {}", event.summary);

        let response = self
            .client
            .post(&url)
            .json(event)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to create calendar event: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        if response.status().is_success() {
            let created: CreatedEvent = response.json().await.map_err(|e| {
                warn!("Failed to parse created event response: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                        "Invalid response from Google Calendar API".to_string(),
                    )),
                }
            })?;
            info!("Created calendar event: {}", created.id);
            Ok(created)
        } else {
            Err(remote_error(response).await)
        }
    }

    /// Patch an existing event on the given calendar
    pub async fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        patch: &CalendarEventPatch,
    ) -> Result<CreatedEvent, Error> {
        let url = format!(
            "{}/calendars/{}/events/{}?sendUpdates=all",
            self.base_url,
            urlencoding::encode(calendar_id),
            urlencoding::encode(event_id)
        );

        debug!("Updating Google Calendar event: {}", event_id);

        let response = self
            .client
            .patch(&url)
            .json(patch)
            .send()
            .await
            .map_err(|e| {
                warn!("Failed to update calendar event: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
                }
            })?;

        if response.status().is_success() {
            let updated: CreatedEvent = response.json().await.map_err(|e| {
                warn!("Failed to parse updated event response: {:?}", e);
                Error {
                    source: Some(Box::new(e)),
                    error_kind: DomainErrorKind::External(ExternalErrorKind::Other(
                        "Invalid response from Google Calendar API".to_string(),
                    )),
                }
            })?;
            Ok(updated)
        } else {
            Err(remote_error(response).await)
        }
    }

    /// Delete an event from the given calendar
    pub async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<(), Error> {
        let url = format!(
            "{}/calendars/{}/events/{}?sendUpdates=all",
            self.base_url,
            urlencoding::encode(calendar_id),
            urlencoding::encode(event_id)
        );

        debug!("Deleting Google Calendar event: {}", event_id);

        let response = self.client.delete(&url).send().await.map_err(|e| {
            warn!("Failed to delete calendar event: {:?}", e);
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(remote_error(response).await)
        }
    }
}

/// Translate a non-2xx Calendar API response into a domain error. A 401
/// becomes `Unauthorized` so callers can attempt a token refresh; anything
/// else carries the provider's error body (logged, not surfaced verbatim).
async fn remote_error(response: reqwest::Response) -> Error {
    let status = response.status();
    let error_text = response.text().await.unwrap_or_default();
    warn!("Google Calendar API error: {} - {}", status, error_text);

    if status == reqwest::StatusCode::UNAUTHORIZED {
        Error {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Unauthorized),
        }
    } else {
        Error {
            source: None,
            error_kind: DomainErrorKind::External(ExternalErrorKind::Other(error_text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainErrorKind, ExternalErrorKind};

    fn oauth_client(server_url: &str) -> GoogleOAuthClient {
        GoogleOAuthClient::new(
            "test-client-id",
            "test-client-secret",
            "http://localhost:4000/oauth/google/callback",
            GoogleOAuthUrls {
                auth_url: format!("{server_url}/auth"),
                token_url: format!("{server_url}/token"),
            },
        )
        .expect("failed to build oauth client")
    }

    fn sample_event() -> CalendarEvent {
        CalendarEvent {
            summary: "Agendamento - Ana Souza".to_string(),
            description: String::new(),
            start: EventDateTime {
                date_time: "2025-06-10T14:00:00-03:00".to_string(),
                time_zone: Some("America/Sao_Paulo".to_string()),
            },
            end: EventDateTime {
                date_time: "2025-06-10T15:00:00-03:00".to_string(),
                time_zone: Some("America/Sao_Paulo".to_string()),
            },
            attendees: vec![],
            location: String::new(),
        }
    }

    #[test]
    fn authorization_url_requests_offline_consent() {
        let client = oauth_client("https://example.test");
        let url = client.authorization_url(&CALENDAR_SCOPES, "user-123");

        assert!(url.starts_with("https://example.test/auth?"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains("prompt=consent"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("state=user-123"));
        // Scopes are space-joined then percent-encoded
        assert!(url.contains(
            "scope=https%3A%2F%2Fwww.googleapis.com%2Fauth%2Fcalendar%20https%3A%2F%2Fwww.googleapis.com%2Fauth%2Fcalendar.events"
        ));
    }

    #[test]
    fn authorization_url_is_deterministic() {
        let client = oauth_client("https://example.test");
        assert_eq!(
            client.authorization_url(&CALENDAR_SCOPES, "user-123"),
            client.authorization_url(&CALENDAR_SCOPES, "user-123")
        );
    }

    #[tokio::test]
    async fn exchange_code_parses_token_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "access_token": "access-123",
                    "refresh_token": "refresh-456",
                    "expires_in": 3599,
                    "token_type": "Bearer",
                    "scope": "https://www.googleapis.com/auth/calendar"
                }"#,
            )
            .create_async()
            .await;

        let client = oauth_client(&server.url());
        let tokens = client.exchange_code("auth-code").await.unwrap();

        assert_eq!(tokens.access_token, "access-123");
        assert_eq!(tokens.refresh_token, Some("refresh-456".to_string()));
        assert_eq!(tokens.expires_in, 3599);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn exchange_code_rejected_by_provider_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(400)
            .with_body(r#"{"error": "invalid_grant"}"#)
            .create_async()
            .await;

        let client = oauth_client(&server.url());
        let result = client.exchange_code("bad-code").await;

        assert!(matches!(
            result.unwrap_err().error_kind,
            DomainErrorKind::External(ExternalErrorKind::Other(_))
        ));
    }

    #[tokio::test]
    async fn exchange_code_without_access_token_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token_type": "Bearer", "expires_in": 3599}"#)
            .create_async()
            .await;

        let client = oauth_client(&server.url());
        let result = client.exchange_code("auth-code").await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn refresh_token_parses_new_access_token() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "access_token": "fresh-access",
                    "expires_in": 3599,
                    "token_type": "Bearer"
                }"#,
            )
            .create_async()
            .await;

        let client = oauth_client(&server.url());
        let tokens = client.refresh_token("refresh-456").await.unwrap();

        assert_eq!(tokens.access_token, "fresh-access");
        assert!(tokens.refresh_token.is_none());
    }

    #[tokio::test]
    async fn primary_calendar_returns_calendar_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/calendars/primary")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"id": "clinic@group.calendar.google.com", "summary": "Clinic", "timeZone": "America/Sao_Paulo"}"#,
            )
            .create_async()
            .await;

        let client = GoogleCalendarClient::new("access-123", &server.url()).unwrap();
        let calendar = client.primary_calendar().await.unwrap();

        assert_eq!(calendar.id, "clinic@group.calendar.google.com");
    }

    #[tokio::test]
    async fn create_event_returns_event_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "POST",
                "/calendars/clinic%40group.calendar.google.com/events?sendUpdates=all",
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "evt-789", "summary": "Agendamento - Ana Souza"}"#)
            .create_async()
            .await;

        let client = GoogleCalendarClient::new("access-123", &server.url()).unwrap();
        let created = client
            .create_event("clinic@group.calendar.google.com", &sample_event())
            .await
            .unwrap();

        assert_eq!(created.id, "evt-789");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_event_with_rejected_token_is_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/calendars/primary/events?sendUpdates=all")
            .with_status(401)
            .with_body(r#"{"error": {"code": 401, "message": "Invalid Credentials"}}"#)
            .create_async()
            .await;

        let client = GoogleCalendarClient::new("stale-token", &server.url()).unwrap();
        let result = client.create_event("primary", &sample_event()).await;

        assert!(result.unwrap_err().is_unauthorized());
    }

    #[tokio::test]
    async fn create_event_other_failure_is_remote_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/calendars/primary/events?sendUpdates=all")
            .with_status(500)
            .with_body("backend error")
            .create_async()
            .await;

        let client = GoogleCalendarClient::new("access-123", &server.url()).unwrap();
        let result = client.create_event("primary", &sample_event()).await;

        let err = result.unwrap_err();
        assert!(!err.is_unauthorized());
        assert!(matches!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Other(_))
        ));
    }

    #[tokio::test]
    async fn update_event_patches_only_provided_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PATCH", "/calendars/primary/events/evt-789?sendUpdates=all")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "summary": "Agendamento - Ana Souza (remarcado)"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "evt-789", "summary": "Agendamento - Ana Souza (remarcado)"}"#)
            .create_async()
            .await;

        let client = GoogleCalendarClient::new("access-123", &server.url()).unwrap();
        let patch = CalendarEventPatch {
            summary: Some("Agendamento - Ana Souza (remarcado)".to_string()),
            ..Default::default()
        };
        let updated = client
            .update_event("primary", "evt-789", &patch)
            .await
            .unwrap();

        assert_eq!(updated.id, "evt-789");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_event_succeeds_on_no_content() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/calendars/primary/events/evt-789?sendUpdates=all")
            .with_status(204)
            .create_async()
            .await;

        let client = GoogleCalendarClient::new("access-123", &server.url()).unwrap();
        assert!(client.delete_event("primary", "evt-789").await.is_ok());
    }

    #[test]
    fn calendar_event_omits_empty_optional_fields() {
        let event = sample_event();
        let json = serde_json::to_value(&event).unwrap();

        assert!(json.get("description").is_none());
        assert!(json.get("attendees").is_none());
        assert!(json.get("location").is_none());
        assert_eq!(json["start"]["dateTime"], "2025-06-10T14:00:00-03:00");
    }
}
