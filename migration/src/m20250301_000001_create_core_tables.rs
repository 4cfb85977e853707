use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE clinic_platform.appointment_status AS ENUM \
                 ('scheduled', 'confirmed', 'completed', 'cancelled', 'no_show')",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared("ALTER TYPE clinic_platform.appointment_status OWNER TO clinic")
            .await?;

        // Clients are owned by the professional identified by user_id; the
        // platform does not manage the user accounts themselves.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE IF NOT EXISTS clinic_platform.clients (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    user_id UUID NOT NULL,
                    name VARCHAR(255) NOT NULL,
                    email VARCHAR(255),
                    phone VARCHAR(50),
                    address JSONB,
                    notes TEXT,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
            "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE IF NOT EXISTS clinic_platform.procedures (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    user_id UUID NOT NULL,
                    name VARCHAR(255) NOT NULL,
                    description TEXT,
                    price_cents BIGINT NOT NULL DEFAULT 0,
                    duration_minutes INTEGER NOT NULL DEFAULT 60,
                    is_active BOOLEAN NOT NULL DEFAULT TRUE,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
            "#,
            )
            .await?;

        // calendar_synced + google_event_id drive the Google Calendar sync:
        // the sync batch picks up rows with calendar_synced = FALSE.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE IF NOT EXISTS clinic_platform.appointments (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    user_id UUID NOT NULL,
                    client_id UUID NOT NULL REFERENCES clinic_platform.clients(id) ON DELETE CASCADE,
                    procedure_id UUID REFERENCES clinic_platform.procedures(id) ON DELETE SET NULL,
                    scheduled_datetime TIMESTAMPTZ NOT NULL,
                    duration_minutes INTEGER,
                    notes TEXT,
                    status clinic_platform.appointment_status NOT NULL DEFAULT 'scheduled',
                    calendar_synced BOOLEAN NOT NULL DEFAULT FALSE,
                    google_event_id VARCHAR(255),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
            "#,
            )
            .await?;

        for table in ["clients", "procedures", "appointments"] {
            manager
                .get_connection()
                .execute_unprepared(&format!(
                    "ALTER TABLE clinic_platform.{table} OWNER TO clinic"
                ))
                .await?;
        }

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_clients_user ON clinic_platform.clients(user_id)",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_appointments_user_unsynced
                 ON clinic_platform.appointments(user_id)
                 WHERE calendar_synced = FALSE",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_appointments_scheduled
                 ON clinic_platform.appointments(user_id, scheduled_datetime)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS clinic_platform.appointments")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS clinic_platform.procedures")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS clinic_platform.clients")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS clinic_platform.appointment_status")
            .await?;

        Ok(())
    }
}
