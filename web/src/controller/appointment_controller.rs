use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::appointment::{IndexParams, UpdateParams};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{appointment as AppointmentApi, appointments, appointments::Model, Id};
use service::config::ApiVersion;

use log::*;

#[utoipa::path(
    get,
    path = "/appointments",
    params(
        ApiVersion,
        ("user_id" = Uuid, Query, description = "Filter by user_id"),
        ("client_id" = Option<Uuid>, Query, description = "Filter by client_id"),
        ("calendar_synced" = Option<bool>, Query, description = "Filter by calendar_synced")
    ),
    responses(
        (status = 200, description = "Successfully retrieved all Appointments", body = [appointments::Model]),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Appointments");
    debug!("Filter Params: {:?}", params);

    let appointments = AppointmentApi::find_by(app_state.db_conn_ref(), params).await?;

    debug!("Found Appointments: {:?}", appointments);

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), appointments)))
}

#[utoipa::path(
    get,
    path = "/appointments/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Appointment ID to fetch")
    ),
    responses(
        (status = 200, description = "Successfully retrieved an Appointment", body = appointments::Model),
        (status = 404, description = "Appointment not found"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn read(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Appointment by id: {}", id);

    let appointment = AppointmentApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), appointment)))
}

/// POST create a new Appointment
///
/// New appointments always start out unsynced; the next calendar sync
/// batch picks them up.
#[utoipa::path(
    post,
    path = "/appointments",
    params(ApiVersion),
    request_body = appointments::Model,
    responses(
        (status = 201, description = "Successfully Created a new Appointment", body = appointments::Model),
        (status = 422, description = "Unprocessable Entity"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(appointment_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!(
        "POST Create a new Appointment from: {:?}",
        appointment_model
    );

    let appointment = AppointmentApi::create(app_state.db_conn_ref(), appointment_model).await?;

    debug!("New Appointment: {:?}", appointment);

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        appointment,
    )))
}

/// PUT update an Appointment
///
/// Changing `scheduled_datetime` resets `calendar_synced` so the
/// rescheduled appointment is synced again.
#[utoipa::path(
    put,
    path = "/appointments/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Appointment ID to Update")
    ),
    request_body = UpdateParams,
    responses(
        (status = 200, description = "Successfully updated an Appointment", body = appointments::Model),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn update(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    let appointment = AppointmentApi::update(app_state.db_conn_ref(), id, params).await?;
    Ok(Json(ApiResponse::new(StatusCode::OK.into(), appointment)))
}

/// DELETE an Appointment
#[utoipa::path(
    delete,
    path = "/appointments/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Appointment ID to Delete")
    ),
    responses(
        (status = 204, description = "Successfully deleted an Appointment"),
        (status = 404, description = "Appointment not found")
    )
)]
pub async fn delete(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    AppointmentApi::delete_by_id(app_state.db_conn_ref(), id).await?;
    Ok(Json(ApiResponse::<()>::no_content(
        StatusCode::NO_CONTENT.into(),
    )))
}
