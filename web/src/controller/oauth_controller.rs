//! Controller for OAuth authentication flows.
//!
//! Handles Google OAuth for the calendar integration.
//!
//! Note: OAuth endpoints don't use CompareApiVersion because they work via
//! browser redirects which cannot set custom headers.

use crate::{AppState, Error};

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect};

use domain::{calendar_connection, Id};
use log::*;
use serde::Deserialize;

/// Query parameters for starting OAuth
#[derive(Debug, Deserialize)]
pub struct OAuthStart {
    pub user_id: Id,
}

/// Query parameters for the OAuth callback
#[derive(Debug, Deserialize)]
pub struct OAuthCallback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// GET /oauth/google/authorize
///
/// Initiates Google OAuth flow by redirecting to Google's authorization endpoint.
/// Note: This endpoint doesn't require x-version header as it's called via browser redirect.
#[utoipa::path(
    get,
    path = "/oauth/google/authorize",
    params(
        ("user_id" = Uuid, Query, description = "User ID to associate with the Google account"),
    ),
    responses(
        (status = 302, description = "Redirect to Google OAuth"),
        (status = 500, description = "Server error (OAuth not configured)"),
    )
)]
pub async fn authorize(
    State(app_state): State<AppState>,
    Query(params): Query<OAuthStart>,
) -> Result<impl IntoResponse, Error> {
    let url = calendar_connection::google_authorize_url(&app_state.config, params.user_id)?;
    Ok(Redirect::temporary(&url))
}

/// GET /oauth/google/callback
///
/// Handles the OAuth callback from Google after user authorization. Always
/// redirects back to the frontend; failures are collapsed into a generic
/// error query flag with the detail logged server-side only.
/// Note: This endpoint doesn't require x-version header as it's called via Google's redirect.
#[utoipa::path(
    get,
    path = "/oauth/google/callback",
    params(
        ("code" = Option<String>, Query, description = "Authorization code from Google"),
        ("state" = Option<String>, Query, description = "State parameter (user ID)"),
        ("error" = Option<String>, Query, description = "Error reported by Google"),
    ),
    responses(
        (status = 302, description = "Redirect to the frontend with a success or error query flag"),
    )
)]
pub async fn callback(
    State(app_state): State<AppState>,
    Query(params): Query<OAuthCallback>,
) -> impl IntoResponse {
    let back_url = app_state.config.google_oauth_redirect_back_url();

    if let Some(error) = params.error {
        warn!("Google OAuth callback reported an error: {error}");
        return Redirect::temporary(&format!("{back_url}?error=oauth_error"));
    }

    let (code, state) = match (params.code, params.state) {
        (Some(code), Some(state)) => (code, state),
        _ => {
            warn!("Google OAuth callback missing code or state parameter");
            return Redirect::temporary(&format!("{back_url}?error=missing_params"));
        }
    };

    let user_id: Id = match state.parse() {
        Ok(user_id) => user_id,
        Err(_) => {
            warn!("Google OAuth callback state is not a valid user id");
            return Redirect::temporary(&format!("{back_url}?error=missing_params"));
        }
    };

    match calendar_connection::exchange_and_store_tokens(
        app_state.db_conn_ref(),
        &app_state.config,
        user_id,
        &code,
    )
    .await
    {
        Ok(redirect_url) => Redirect::temporary(&redirect_url),
        Err(e) => {
            warn!("Google OAuth exchange failed for user {user_id}: {e:?}");
            Redirect::temporary(&format!("{back_url}?error=connection_failed"))
        }
    }
}
