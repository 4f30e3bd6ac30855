use sea_orm_migration::{prelude::*, schema::*};

use super::m20240601_000002_create_beds::Bed;
use super::m20240601_000003_create_patients::Patient;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(pk_auto(Booking::Id))
                    .col(integer(Booking::BedId).not_null())
                    .col(integer(Booking::PatientId).not_null())
                    .col(timestamp_with_time_zone(Booking::BookingDate).not_null())
                    // Active | Completed | Cancelled
                    .col(
                        string_len(Booking::Status, 20)
                            .not_null()
                            .default("Active"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_bed")
                            .from(Booking::Table, Booking::BedId)
                            .to(Bed::Table, Bed::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_patient")
                            .from(Booking::Table, Booking::PatientId)
                            .to(Patient::Table, Patient::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    BedId,
    PatientId,
    BookingDate,
    Status,
}
