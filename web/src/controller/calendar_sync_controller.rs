//! Controller for the Google Calendar synchronization endpoints.

use crate::controller::ApiResponse;
use crate::error::WebErrorKind;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::calendar_sync::{StatusParams, SyncParams};
use crate::{AppState, Error};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use domain::{calendar_connection, calendar_sync, Id};
use service::config::ApiVersion;

use log::*;

/// POST /calendar/sync
///
/// Runs one sync batch: every unsynced appointment of the user is pushed
/// to their connected Google Calendar. Partial failure is normal; the
/// response carries a per-appointment outcome list.
#[utoipa::path(
    post,
    path = "/calendar/sync",
    params(ApiVersion),
    request_body = SyncParams,
    responses(
        (status = 200, description = "Batch executed; response lists per-appointment outcomes"),
        (status = 400, description = "Missing user_id"),
        (status = 404, description = "No calendar connection for this user"),
        (status = 502, description = "Calendar provider unreachable"),
    )
)]
pub async fn sync(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(params): Json<SyncParams>,
) -> Result<impl IntoResponse, Error> {
    let user_id = params.user_id.ok_or(Error::Web(WebErrorKind::Input))?;

    debug!("POST run calendar sync batch for user {user_id}");

    let batch =
        calendar_sync::sync_all(app_state.db_conn_ref(), &app_state.config, user_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), batch)))
}

/// GET /calendar/sync/status
///
/// Reports how many of the user's appointments are on the external
/// calendar plus the most recent entries of the sync log.
#[utoipa::path(
    get,
    path = "/calendar/sync/status",
    params(
        ApiVersion,
        ("user_id" = Option<Uuid>, Query, description = "User ID to report on"),
    ),
    responses(
        (status = 200, description = "Current sync status snapshot"),
        (status = 400, description = "Missing user_id"),
    )
)]
pub async fn status(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Query(params): Query<StatusParams>,
) -> Result<impl IntoResponse, Error> {
    let user_id = params.user_id.ok_or(Error::Web(WebErrorKind::Input))?;

    let snapshot = calendar_sync::sync_status(app_state.db_conn_ref(), user_id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), snapshot)))
}

/// GET /users/{user_id}/calendar/connection
///
/// Reports whether the user has a Google Calendar connected. Never exposes
/// tokens.
#[utoipa::path(
    get,
    path = "/users/{user_id}/calendar/connection",
    params(
        ApiVersion,
        ("user_id" = Uuid, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "Connection status"),
    )
)]
pub async fn connection_status(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(user_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    let status = calendar_connection::status(app_state.db_conn_ref(), user_id).await?;
    Ok(Json(ApiResponse::new(StatusCode::OK.into(), status)))
}

/// DELETE /users/{user_id}/calendar/connection
///
/// Disconnects the user's Google Calendar by deleting the stored
/// credentials.
#[utoipa::path(
    delete,
    path = "/users/{user_id}/calendar/connection",
    params(
        ApiVersion,
        ("user_id" = Uuid, Path, description = "User ID"),
    ),
    responses(
        (status = 204, description = "Google Calendar disconnected"),
        (status = 404, description = "No calendar connection for this user"),
    )
)]
pub async fn disconnect(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(user_id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    calendar_connection::disconnect(app_state.db_conn_ref(), user_id).await?;

    info!("Google Calendar disconnected for user {user_id}");

    Ok(Json(ApiResponse::<()>::no_content(
        StatusCode::NO_CONTENT.into(),
    )))
}
