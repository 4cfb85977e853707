pub use super::appointments::Entity as Appointments;
pub use super::calendar_connections::Entity as CalendarConnections;
pub use super::clients::Entity as Clients;
pub use super::procedures::Entity as Procedures;
pub use super::sync_events::Entity as SyncEvents;
