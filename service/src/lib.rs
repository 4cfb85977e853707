use log::info;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::sync::Arc;
use std::time::Duration;

pub mod config;
pub mod logging;

use config::Config;

/// Shared application state passed into every axum handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    db_conn: Arc<DatabaseConnection>,
}

impl AppState {
    pub fn new(config: Config, db_conn: &Arc<DatabaseConnection>) -> Self {
        Self {
            config,
            db_conn: Arc::clone(db_conn),
        }
    }

    pub fn db_conn_ref(&self) -> &DatabaseConnection {
        &self.db_conn
    }
}

/// Opens the Postgres connection pool using the pool sizing and timeout
/// settings from `Config`.
pub async fn init_database(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(config.database_url().to_owned());
    opts.max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .connect_timeout(Duration::from_secs(config.db_connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.db_acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime_secs));

    let db = Database::connect(opts).await?;
    info!("Database connection pool established");
    Ok(db)
}
