use crate::{DbError, Result};

use std::panic::Location;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// The single connection operation the bootstrap sequencer invokes.
///
/// Implemented by [`SqliteConnector`] in production; tests substitute
/// implementations that fail or hang to exercise the degraded paths.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<SqlitePool>;
}

/// Opens the SQLite pool, runs migrations, and bounds the whole attempt
/// with a timeout. Expiry counts as a connection failure.
pub struct SqliteConnector {
    path: PathBuf,
    max_connections: u32,
    connect_timeout: Duration,
}

impl SqliteConnector {
    pub fn new(path: impl Into<PathBuf>, max_connections: u32, connect_timeout: Duration) -> Self {
        Self {
            path: path.into(),
            max_connections,
            connect_timeout,
        }
    }

    async fn open_pool(&self) -> Result<SqlitePool> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DbError::Initialization {
                    message: format!("Failed to create database directory: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .connect_with(options)
            .await?;

        // Enable foreign keys
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await?;

        run_migrations(&pool).await?;

        Ok(pool)
    }
}

#[async_trait]
impl Connector for SqliteConnector {
    async fn connect(&self) -> Result<SqlitePool> {
        match tokio::time::timeout(self.connect_timeout, self.open_pool()).await {
            Ok(result) => result,
            Err(_) => Err(DbError::Timeout {
                secs: self.connect_timeout.as_secs(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// Run embedded migrations against an already-open pool.
///
/// Exposed so tests can prepare in-memory databases.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DbError::Migration {
            message: format!("Migration failed: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

    Ok(())
}
