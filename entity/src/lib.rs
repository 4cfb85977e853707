use uuid::Uuid;

pub mod prelude;

// Core entities
pub mod appointment_status;
pub mod appointments;
pub mod calendar_connections;
pub mod clients;
pub mod procedures;
pub mod provider;
pub mod sync_events;
pub mod sync_outcome;

/// A type alias that represents any Entity's internal id field data type.
/// Aliased so that it's easy to change the underlying type if necessary.
pub type Id = Uuid;
