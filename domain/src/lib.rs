//! This module re-exports various items from the `entity_api` crate.
//!
//! The purpose of this re-export is to ensure that consumers of the `domain` crate do not need to
//! directly depend on the `entity_api` crate. By re-exporting these items, we provide a clear and
//! consistent interface for working with query filters within the domain layer, while encapsulating
//! the underlying implementation details remain in the `entity_api` crate.
pub use entity_api::{
    mutate::{IntoUpdateMap, UpdateMap},
    IntoQueryFilterMap, QueryFilterMap,
};

// Re-exports from `entity` crate via `entity_api`
pub use entity_api::{
    appointment_status, appointments, calendar_connections, clients, procedures, provider,
    sync_events, sync_outcome, Id,
};

pub mod appointment;
pub mod calendar_connection;
pub mod calendar_sync;
pub mod client;
pub mod encryption;
pub mod error;
pub mod procedure;

pub mod gateway;
