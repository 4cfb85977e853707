use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create the provider enum. Starting with 'google' only; add
        // providers via ALTER TYPE ADD VALUE as needed.
        manager
            .get_connection()
            .execute_unprepared("CREATE TYPE clinic_platform.provider AS ENUM ('google')")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("ALTER TYPE clinic_platform.provider OWNER TO clinic")
            .await?;

        // Per-user external calendar credentials. Tokens are encrypted at
        // the application layer via domain::encryption (AES-256-GCM).
        // Row existence = connected; deletion = disconnected. No soft-delete.
        let create_table_sql = r#"
            CREATE TABLE IF NOT EXISTS clinic_platform.calendar_connections (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                user_id UUID NOT NULL,

                provider clinic_platform.provider NOT NULL,
                external_email VARCHAR(255),

                access_token TEXT NOT NULL,
                refresh_token TEXT,
                calendar_id VARCHAR(255) NOT NULL,
                token_expires_at TIMESTAMPTZ,
                token_type VARCHAR(50) NOT NULL DEFAULT 'Bearer',
                scopes TEXT NOT NULL DEFAULT '',

                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                UNIQUE(user_id, provider)
            )
        "#;

        manager
            .get_connection()
            .execute_unprepared(create_table_sql)
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE clinic_platform.calendar_connections OWNER TO clinic",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_calendar_connections_user_provider
                 ON clinic_platform.calendar_connections(user_id, provider)",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS clinic_platform.calendar_connections")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS clinic_platform.provider")
            .await?;

        Ok(())
    }
}
