pub mod friends;
pub mod inventory;
pub mod stats;
pub mod tasks;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn connect(config: &AppConfig) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect_with(options)
        .await?;

    migrate(&pool).await?;
    info!("database ready at {}", config.database_url);
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Opens a transaction that holds the write lock from its first statement.
///
/// Use for every read-then-write unit of work: a deferred transaction that
/// reads first cannot upgrade its lock while another connection writes, and
/// SQLite fails it with `SQLITE_BUSY` without waiting on the busy timeout.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, AppError> {
    let tx = pool.begin_with("BEGIN IMMEDIATE").await?;
    Ok(tx)
}
