//! Embedded schema migrations.

use sqlx::PgPool;
use sqlx::migrate::{Migrate, Migrator};
use tracing::info;

use contacts_core::error::{AppError, ErrorKind};

/// Migrations compiled from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Apply every pending migration.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!(available = MIGRATOR.iter().count(), "Running database migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database migrations completed");
    Ok(())
}

/// Whether one embedded migration has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub version: i64,
    pub description: String,
    pub applied: bool,
}

/// Compare the embedded migrations with the database's migration table.
pub async fn migration_status(pool: &PgPool) -> Result<Vec<MigrationStatus>, AppError> {
    let mut conn = pool.acquire().await.map_err(|e| {
        AppError::with_source(ErrorKind::Database, "Failed to acquire connection", e)
    })?;

    conn.ensure_migrations_table()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read migrations", e))?;
    let applied: Vec<i64> = conn
        .list_applied_migrations()
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read migrations", e))?
        .into_iter()
        .map(|m| m.version)
        .collect();

    Ok(MIGRATOR
        .iter()
        .filter(|m| m.migration_type.is_up_migration())
        .map(|m| MigrationStatus {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect())
}
