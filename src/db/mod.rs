use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;
use crate::error::{AppError, AppResult};

pub async fn connect(config: &Config) -> AppResult<DatabaseConnection> {
    Database::connect(&config.database_url)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to connect to database: {}", e)))
}

/// Create every table that does not exist yet.
pub async fn bootstrap(db: &DatabaseConnection) -> AppResult<()> {
    migration::Migrator::up(db, None).await?;
    Ok(())
}
