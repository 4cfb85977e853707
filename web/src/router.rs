use crate::{controller::health_check_controller, params, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::controller::{
    appointment_controller, calendar_sync_controller, client_controller, oauth_controller,
    procedure_controller,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Clinic Platform API"
        ),
        paths(
            appointment_controller::index,
            appointment_controller::read,
            appointment_controller::create,
            appointment_controller::update,
            appointment_controller::delete,
            client_controller::index,
            client_controller::read,
            client_controller::create,
            client_controller::update,
            client_controller::delete,
            procedure_controller::index,
            procedure_controller::read,
            procedure_controller::create,
            procedure_controller::update,
            procedure_controller::delete,
            oauth_controller::authorize,
            oauth_controller::callback,
            calendar_sync_controller::sync,
            calendar_sync_controller::status,
            calendar_sync_controller::connection_status,
            calendar_sync_controller::disconnect,
        ),
        components(
            schemas(
                domain::appointments::Model,
                domain::clients::Model,
                domain::procedures::Model,
                domain::calendar_connections::Model,
                domain::sync_events::Model,
                domain::appointment_status::AppointmentStatus,
                domain::provider::Provider,
                domain::sync_outcome::SyncOutcome,
                params::appointment::UpdateParams,
                params::client::UpdateParams,
                params::procedure::UpdateParams,
                params::calendar_sync::SyncParams,
            )
        ),
        tags(
            (name = "clinic_platform", description = "Aesthetic Clinic Management API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(appointment_routes(app_state.clone()))
        .merge(client_routes(app_state.clone()))
        .merge(procedure_routes(app_state.clone()))
        .merge(oauth_routes(app_state.clone()))
        .merge(calendar_sync_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn appointment_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/appointments", get(appointment_controller::index))
        .route("/appointments", post(appointment_controller::create))
        .route("/appointments/:id", get(appointment_controller::read))
        .route("/appointments/:id", put(appointment_controller::update))
        .route("/appointments/:id", delete(appointment_controller::delete))
        .with_state(app_state)
}

fn client_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/clients", get(client_controller::index))
        .route("/clients", post(client_controller::create))
        .route("/clients/:id", get(client_controller::read))
        .route("/clients/:id", put(client_controller::update))
        .route("/clients/:id", delete(client_controller::delete))
        .with_state(app_state)
}

fn procedure_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/procedures", get(procedure_controller::index))
        .route("/procedures", post(procedure_controller::create))
        .route("/procedures/:id", get(procedure_controller::read))
        .route("/procedures/:id", put(procedure_controller::update))
        .route("/procedures/:id", delete(procedure_controller::delete))
        .with_state(app_state)
}

fn oauth_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/oauth/google/authorize", get(oauth_controller::authorize))
        .route("/oauth/google/callback", get(oauth_controller::callback))
        .with_state(app_state)
}

fn calendar_sync_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/calendar/sync", post(calendar_sync_controller::sync))
        .route("/calendar/sync/status", get(calendar_sync_controller::status))
        .route(
            "/users/:user_id/calendar/connection",
            get(calendar_sync_controller::connection_status),
        )
        .route(
            "/users/:user_id/calendar/connection",
            delete(calendar_sync_controller::disconnect),
        )
        .with_state(app_state)
}
