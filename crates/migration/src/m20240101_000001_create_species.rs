use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Species::Table)
                    .if_not_exists()
                    .col(uuid(Species::Id).primary_key())
                    .col(string_len(Species::Name, 128).not_null())
                    .col(string_len(Species::DisplayName, 256).not_null())
                    .col(boolean(Species::RequestCastrationStatus).not_null())
                    .col(
                        ColumnDef::new(Species::MatchWords)
                            .array(ColumnType::Text)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Species::IconData).binary().null())
                    .col(small_integer(Species::IconType).not_null())
                    .col(timestamp_with_time_zone(Species::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Species::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Species::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Species {
    Table,
    Id,
    Name,
    DisplayName,
    RequestCastrationStatus,
    MatchWords,
    IconData,
    IconType,
    CreatedAt,
    UpdatedAt,
}
