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
                    .table(Admin::Table)
                    .if_not_exists()
                    .col(pk_auto(Admin::Id))
                    .col(string_len(Admin::Username, 50).not_null().unique_key())
                    .col(string_len(Admin::PasswordHash, 255).not_null())
                    .col(integer_null(Admin::HospitalId))
                    .col(timestamp_with_time_zone(Admin::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_hospital")
                            .from(Admin::Table, Admin::HospitalId)
                            .to(Hospital::Table, Hospital::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admin::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Admin {
    Table,
    Id,
    Username,
    PasswordHash,
    HospitalId,
    CreatedAt,
}
