use sea_orm_migration::{prelude::*, schema::*};

use super::m20240601_000001_create_hospitals::Hospital;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bed::Table)
                    .if_not_exists()
                    .col(pk_auto(Bed::Id))
                    .col(integer(Bed::HospitalId).not_null())
                    .col(string_len(Bed::BedNumber, 20).not_null())
                    // General | ICU | Ventilator
                    .col(string_len(Bed::BedType, 20).not_null())
                    .col(
                        string_len(Bed::Status, 20)
                            .not_null()
                            .default("Available"),
                    )
                    .col(timestamp_with_time_zone(Bed::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bed_hospital")
                            .from(Bed::Table, Bed::HospitalId)
                            .to(Hospital::Table, Hospital::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bed_hospital_status")
                    .table(Bed::Table)
                    .col(Bed::HospitalId)
                    .col(Bed::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bed::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Bed {
    Table,
    Id,
    HospitalId,
    BedNumber,
    BedType,
    Status,
    CreatedAt,
}
