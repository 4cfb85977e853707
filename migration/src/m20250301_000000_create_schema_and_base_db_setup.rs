use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create the platform's schema
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS clinic_platform;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("SET search_path TO clinic_platform, public;")
            .await?;

        // Grant the base DB user that executes all platform queries
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$ BEGIN
                    GRANT ALL PRIVILEGES ON DATABASE clinic TO clinic;
                    GRANT ALL ON SCHEMA clinic_platform TO clinic;

                    ALTER DEFAULT PRIVILEGES IN SCHEMA clinic_platform GRANT ALL ON TABLES TO clinic;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA clinic_platform GRANT ALL ON SEQUENCES TO clinic;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA clinic_platform GRANT ALL ON FUNCTIONS TO clinic;
                END $$;
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Revoke default privileges first
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$ BEGIN
                    ALTER DEFAULT PRIVILEGES IN SCHEMA clinic_platform REVOKE ALL ON FUNCTIONS FROM clinic;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA clinic_platform REVOKE ALL ON SEQUENCES FROM clinic;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA clinic_platform REVOKE ALL ON TABLES FROM clinic;
                    REVOKE ALL ON SCHEMA clinic_platform FROM clinic;
                    REVOKE ALL PRIVILEGES ON DATABASE clinic FROM clinic;
                END $$;
            "#,
            )
            .await?;

        // Drop the schema (CASCADE will remove all objects in it)
        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS clinic_platform CASCADE;")
            .await?;

        Ok(())
    }
}
