pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_hospitals;
mod m20240601_000002_create_beds;
mod m20240601_000003_create_patients;
mod m20240601_000004_create_bookings;
mod m20240601_000005_create_admins;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_hospitals::Migration),
            Box::new(m20240601_000002_create_beds::Migration),
            Box::new(m20240601_000003_create_patients::Migration),
            Box::new(m20240601_000004_create_bookings::Migration),
            Box::new(m20240601_000005_create_admins::Migration),
        ]
    }
}
