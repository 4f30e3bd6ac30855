use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Patient::Table)
                    .if_not_exists()
                    .col(pk_auto(Patient::Id))
                    .col(string_len(Patient::Name, 100).not_null())
                    .col(integer(Patient::Age).not_null())
                    .col(string_len(Patient::Gender, 10).not_null())
                    .col(string_len(Patient::ContactNumber, 20).not_null())
                    .col(string_len(Patient::Email, 100).not_null())
                    .col(timestamp_with_time_zone(Patient::CreatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        // Bookings are looked up by email, and one email may own many rows
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_patient_email")
                    .table(Patient::Table)
                    .col(Patient::Email)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Patient::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Patient {
    Table,
    Id,
    Name,
    Age,
    Gender,
    ContactNumber,
    Email,
    CreatedAt,
}
