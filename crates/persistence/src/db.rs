//! Database connection pool management and startup initialization.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::schema;

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// Errors raised while preparing the database at startup.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Creates a SQLite connection pool with the given configuration.
///
/// The database file is created if missing. Foreign keys are enforced and
/// the journal runs in WAL mode.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(config.connect_timeout_secs));

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .connect_with(options)
        .await
}

/// Brings the schema up to date.
///
/// Order matters: legacy tables are upgraded first so the migration's
/// indexes can reference `user_id`, then orphaned log rows are handed to the
/// first registered user.
pub async fn initialize(pool: &SqlitePool) -> Result<(), InitError> {
    schema::prepare_legacy_tables(pool).await?;

    sqlx::migrate!("./src/migrations").run(pool).await?;
    tracing::info!("Database migrations completed");

    let assigned = schema::assign_orphaned_logs(pool).await?;
    if assigned > 0 {
        tracing::info!(rows = assigned, "Assigned orphaned log rows to first user");
    }

    Ok(())
}
