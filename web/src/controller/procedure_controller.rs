use crate::controller::ApiResponse;
use crate::extractors::compare_api_version::CompareApiVersion;
use crate::params::procedure::{IndexParams, UpdateParams};
use crate::{AppState, Error};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use domain::{procedure as ProcedureApi, procedures, procedures::Model, Id};
use service::config::ApiVersion;

use log::*;

#[utoipa::path(
    get,
    path = "/procedures",
    params(
        ApiVersion,
        ("user_id" = Uuid, Query, description = "Filter by user_id"),
        ("is_active" = Option<bool>, Query, description = "Filter by is_active")
    ),
    responses(
        (status = 200, description = "Successfully retrieved all Procedures", body = [procedures::Model]),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn index(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET all Procedures");
    debug!("Filter Params: {:?}", params);

    let procedures = ProcedureApi::find_by(app_state.db_conn_ref(), params).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), procedures)))
}

#[utoipa::path(
    get,
    path = "/procedures/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Procedure ID to fetch")
    ),
    responses(
        (status = 200, description = "Successfully retrieved a Procedure", body = procedures::Model),
        (status = 404, description = "Procedure not found"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn read(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET Procedure by id: {}", id);

    let procedure = ProcedureApi::find_by_id(app_state.db_conn_ref(), id).await?;

    Ok(Json(ApiResponse::new(StatusCode::OK.into(), procedure)))
}

/// POST create a new Procedure
#[utoipa::path(
    post,
    path = "/procedures",
    params(ApiVersion),
    request_body = procedures::Model,
    responses(
        (status = 201, description = "Successfully Created a new Procedure", body = procedures::Model),
        (status = 422, description = "Unprocessable Entity"),
        (status = 405, description = "Method not allowed")
    )
)]
pub async fn create(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Json(procedure_model): Json<Model>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST Create a new Procedure from: {:?}", procedure_model);

    let procedure = ProcedureApi::create(app_state.db_conn_ref(), procedure_model).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::CREATED.into(),
        procedure,
    )))
}

/// PUT update a Procedure
#[utoipa::path(
    put,
    path = "/procedures/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Procedure ID to Update")
    ),
    request_body = UpdateParams,
    responses(
        (status = 200, description = "Successfully updated a Procedure", body = procedures::Model),
        (status = 404, description = "Procedure not found")
    )
)]
pub async fn update(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
    Json(params): Json<UpdateParams>,
) -> Result<impl IntoResponse, Error> {
    let procedure = ProcedureApi::update(app_state.db_conn_ref(), id, params).await?;
    Ok(Json(ApiResponse::new(StatusCode::OK.into(), procedure)))
}

/// DELETE a Procedure
#[utoipa::path(
    delete,
    path = "/procedures/{id}",
    params(
        ApiVersion,
        ("id" = Uuid, Path, description = "Procedure ID to Delete")
    ),
    responses(
        (status = 204, description = "Successfully deleted a Procedure"),
        (status = 404, description = "Procedure not found")
    )
)]
pub async fn delete(
    CompareApiVersion(_v): CompareApiVersion,
    State(app_state): State<AppState>,
    Path(id): Path<Id>,
) -> Result<impl IntoResponse, Error> {
    ProcedureApi::delete_by_id(app_state.db_conn_ref(), id).await?;
    Ok(Json(ApiResponse::<()>::no_content(
        StatusCode::NO_CONTENT.into(),
    )))
}
