pub use sea_orm_migration::prelude::*;

mod m20250301_000000_create_schema_and_base_db_setup;
mod m20250301_000001_create_core_tables;
mod m20250412_000000_add_calendar_connections;
mod m20250520_000000_add_sync_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000000_create_schema_and_base_db_setup::Migration),
            Box::new(m20250301_000001_create_core_tables::Migration),
            Box::new(m20250412_000000_add_calendar_connections::Migration),
            Box::new(m20250520_000000_add_sync_events::Migration),
        ]
    }
}
