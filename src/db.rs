//! Pooled SQLite connections and schema setup.
//!
//! Connections are checked out of the pool per statement or transaction and
//! go back to it when dropped, on success and error paths alike.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::config::Config;
use crate::utils::error::{AppError, AppResult};

pub async fn connect(config: &Config) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| {
            AppError::ConfigError(format!("Invalid DATABASE_URL '{}': {}", config.database_url, e))
        })?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(config.busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!(
        url = %config.database_url,
        max_connections = config.max_connections,
        "Connected to database"
    );

    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> AppResult<()> {
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Migrations run successfully");
    Ok(())
}

/// Connects and brings the schema up to date.
pub async fn init(config: &Config) -> AppResult<SqlitePool> {
    let pool = connect(config).await?;
    migrate(&pool).await?;
    Ok(pool)
}
