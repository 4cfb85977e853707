use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::client::{IndexParams, UpdateParams};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{client as ClientApi, clients, clients::Model, Id};
use service::config::ApiVersion;

use log::*;

#[utoipa::path(
    get,
    path = "/clients",
    params(
        ApiVersion,
        ("user_id" = Uuid, Query, description = "Filter by user_id"),
        ("email" = Option<String>, Query, description = "Filter by email")
    ),
    responses(
        (status = 200, description = "Successfully retrieved all Clients", body = [clients::Model]),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Clients");
    debug!("Filter Params: {:?}", params);

    let clients = ClientApi::find_by(app_state.db_conn_ref(), params).await?;

    debug!("Found Clients: {:?}", clients);

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), clients)))
}

#[utoipa::path(
    get,
    path = "/clients/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Client ID to fetch")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a Client", body = clients::Model),
        (status = 404, description = "Client not found"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn read(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Client by id: {}", id);

    let client = ClientApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), client)))
}

/// POST create a new Client
#[utoipa::path(
    post,
    path = "/clients",
    params(ApiVersion),
    request_body = clients::Model,
    responses(
        (status = 201, description = "Successfully Created a new Client", body = clients::Model),
        (status = 422, description = "Unprocessable Entity"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(client_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a new Client from: {:?}", client_model);

    let client = ClientApi::create(app_state.db_conn_ref(), client_model).await?;

    debug!("New Client: {:?}", client);

    Ok(Json(ApiResponse::new(StatusCode::CREATED.into(), client)))
}

/// PUT update a Client
#[utoipa::path(
    put,
    path = "/clients/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Client ID to Update")
    ),
    request_body = UpdateParams,
    responses(
        (status = 200, description = "Successfully updated a Client", body = clients::Model),
        (status = 404, description = "Client not found")
    )
)]
pub async fn update(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    let client = ClientApi::update(app_state.db_conn_ref(), id, params).await?;
    Ok(Json(ApiResponse::new(StatusCode::OK.into(), client)))
}

/// DELETE a Client
#[utoipa::path(
    delete,
    path = "/clients/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Client ID to Delete")
    ),
    responses(
        (status = 204, description = "Successfully deleted a Client"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn delete(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    ClientApi::delete_by_id(app_state.db_conn_ref(), id).await?;
    Ok(Json(ApiResponse::<()>::no_content(
        StatusCode::NO_CONTENT.into(),
    )))
}
