//! # Daycare DB
//!
//! SQLite storage for the daycare service: connection pool, schema, repository
//! functions per table, conflict-checked slot writes, and the
//! [`store::GenerationStore`] persistence collaborator used by session generation.

pub mod models;
pub mod repositories;
pub mod schema;
pub mod slot_store;
pub mod store;

pub mod mock;

use std::str::FromStr;
use std::time::Duration;

use eyre::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

pub type DbPool = Pool<Sqlite>;

/// Opens (creating if needed) a file-backed database in WAL mode with foreign keys on.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// A private in-memory database. Limited to one connection, since every SQLite
/// memory connection is its own database.
pub async fn create_memory_pool() -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}
