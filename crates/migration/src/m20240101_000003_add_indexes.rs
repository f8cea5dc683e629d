use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Species: unique lookup by name
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_species_name")
                    .table(Species::Table)
                    .col(Species::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Treatment: unique lookup by name
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_treatment_name")
                    .table(Treatment::Table)
                    .col(Treatment::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Array containment indexes need GIN, which the schema builder does
        // not cover; create them with raw statements.
        let conn = manager.get_connection();
        conn.execute_unprepared(
            r#"CREATE INDEX IF NOT EXISTS "idx_species_match_words" ON "species" USING GIN ("match_words")"#,
        )
        .await?;
        conn.execute_unprepared(
            r#"CREATE INDEX IF NOT EXISTS "idx_treatment_species" ON "treatment" USING GIN ("species")"#,
        )
        .await?;
        conn.execute_unprepared(
            r#"CREATE INDEX IF NOT EXISTS "idx_treatment_match_event_text" ON "treatment" USING GIN ("match_event_text")"#,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_species_name").table(Species::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_treatment_name").table(Treatment::Table).to_owned())
            .await?;

        let conn = manager.get_connection();
        conn.execute_unprepared(r#"DROP INDEX IF EXISTS "idx_species_match_words""#).await?;
        conn.execute_unprepared(r#"DROP INDEX IF EXISTS "idx_treatment_species""#).await?;
        conn.execute_unprepared(r#"DROP INDEX IF EXISTS "idx_treatment_match_event_text""#).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Species {
    Table,
    Name,
}

#[derive(DeriveIden)]
enum Treatment {
    Table,
    Name,
}
