use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hospital::Table)
                    .if_not_exists()
                    .col(pk_auto(Hospital::Id))
                    .col(string_len(Hospital::Name, 100).not_null())
                    .col(string_len(Hospital::Location, 200).not_null())
                    .col(string_len_null(Hospital::ContactNumber, 20))
                    .col(string_len_null(Hospital::Email, 100))
                    .col(timestamp_with_time_zone(Hospital::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Hospital::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Hospital {
    Table,
    Id,
    Name,
    Location,
    ContactNumber,
    Email,
    CreatedAt,
}
