use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE clinic_platform.sync_outcome AS ENUM ('success', 'failure')",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared("ALTER TYPE clinic_platform.sync_outcome OWNER TO clinic")
            .await?;

        // Append-only log of calendar sync attempts. Replaces the old
        // approach of reconstructing sync history from appointment rows,
        // which lost ordering whenever a record was updated without a
        // resync.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE IF NOT EXISTS clinic_platform.sync_events (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    user_id UUID NOT NULL,
                    appointment_id UUID NOT NULL REFERENCES clinic_platform.appointments(id) ON DELETE CASCADE,
                    google_event_id VARCHAR(255),
                    outcome clinic_platform.sync_outcome NOT NULL,
                    error_detail TEXT,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
            "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared("ALTER TABLE clinic_platform.sync_events OWNER TO clinic")
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_sync_events_user_created
                 ON clinic_platform.sync_events(user_id, created_at DESC)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS clinic_platform.sync_events")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS clinic_platform.sync_outcome")
            .await?;

        Ok(())
    }
}
