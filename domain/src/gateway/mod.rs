//! Clients for external HTTP APIs consumed by the domain layer.

pub mod google_calendar;
