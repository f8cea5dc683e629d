use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Treatment::Table)
                    .if_not_exists()
                    .col(uuid(Treatment::Id).primary_key())
                    .col(string_len(Treatment::Name, 128).not_null())
                    .col(string_len(Treatment::DisplayName, 256).not_null())
                    .col(text(Treatment::HelpText).not_null())
                    // referenced species names; integrity is checked at write time
                    .col(
                        ColumnDef::new(Treatment::Species)
                            .array(ColumnType::Text)
                            .not_null(),
                    )
                    .col(big_integer(Treatment::InitialTimeRequirementMs).not_null())
                    .col(big_integer(Treatment::AdditionalTimeRequirementMs).not_null())
                    .col(
                        ColumnDef::new(Treatment::AllowedEmployees)
                            .array(ColumnType::Text)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Treatment::PreferredEmployees)
                            .array(ColumnType::Text)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Treatment::MatchEventText)
                            .array(ColumnType::Text)
                            .not_null(),
                    )
                    .col(boolean(Treatment::AllowSelfBooking).not_null())
                    .col(
                        ColumnDef::new(Treatment::Resources)
                            .array(ColumnType::Text)
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone(Treatment::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Treatment::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Treatment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Treatment {
    Table,
    Id,
    Name,
    DisplayName,
    HelpText,
    Species,
    InitialTimeRequirementMs,
    AdditionalTimeRequirementMs,
    AllowedEmployees,
    PreferredEmployees,
    MatchEventText,
    AllowSelfBooking,
    Resources,
    CreatedAt,
    UpdatedAt,
}
