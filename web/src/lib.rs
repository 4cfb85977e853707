use axum::http::{HeaderValue, Method};
use log::*;
use tower_http::cors::CorsLayer;

mod controller;
mod error;
mod extractors;
mod params;
mod router;

pub use error::{Error, Result};
pub use service::AppState;

/// Binds the listener and serves the API router until shutdown.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let cors = build_cors_layer(&app_state);

    let router = router::define_routes(app_state.clone()).layer(cors);

    let interface = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", interface, app_state.config.port);

    info!("Server starting... listening for requests on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await
}

fn build_cors_layer(app_state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(tower_http::cors::Any)
}
