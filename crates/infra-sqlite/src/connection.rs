// SQLite Connection Pool Setup & Connection Source

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use dbkit_core::error::Result;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Anything able to hand out one connection at a time
///
/// This is the only capability the execution helper depends on.
#[async_trait]
pub trait ConnectionSource: Send + Sync {
    /// Acquire a connection; it goes back to its owner when dropped
    async fn connection(&self) -> std::result::Result<PoolConnection<Sqlite>, sqlx::Error>;
}

#[async_trait]
impl ConnectionSource for SqlitePool {
    async fn connection(&self) -> std::result::Result<PoolConnection<Sqlite>, sqlx::Error> {
        self.acquire().await
    }
}

/// Pool configuration
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub database_url: String,
    pub max_connections: u32,
    pub busy_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 5,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

impl PoolSettings {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Self::default()
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

/// Create SQLite connection pool with WAL mode and foreign keys enforced
pub async fn create_pool(settings: &PoolSettings) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&settings.database_url)
        .map_err(|e| {
            map_sqlx_error(
                format!("Invalid database url: {}", settings.database_url),
                e,
            )
        })?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(settings.busy_timeout)
        .foreign_keys(true)
        .create_if_missing(true);

    let mut pool_options = SqlitePoolOptions::new().max_connections(settings.max_connections);

    // An in-memory database lives only as long as one of its connections
    if settings.is_in_memory() {
        pool_options = pool_options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| map_sqlx_error("Can't open connection pool", e))?;

    info!(
        database_url = %settings.database_url,
        max_connections = settings.max_connections,
        "Connection pool ready"
    );

    Ok(pool)
}

/// Fresh, private in-memory database (each call gets its own)
pub async fn create_in_memory_pool() -> Result<SqlitePool> {
    create_pool(&PoolSettings::default()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_pool() {
        let pool = create_in_memory_pool().await.unwrap();
        assert!(pool.connection().await.is_ok());
    }

    #[tokio::test]
    async fn test_in_memory_pools_are_isolated() {
        let first = create_in_memory_pool().await.unwrap();
        let second = create_in_memory_pool().await.unwrap();

        sqlx::query("CREATE TABLE only_here (id INTEGER)")
            .execute(&first)
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'only_here'",
        )
        .fetch_one(&second)
        .await
        .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_unreachable_database_is_execution_error() {
        let settings = PoolSettings::new("sqlite:///definitely/missing/dir/dbkit.db");
        let err = create_pool(&settings).await.unwrap_err();
        assert!(err.is_execution());
    }

    #[tokio::test]
    async fn test_closed_pool_refuses_connections() {
        let pool = create_in_memory_pool().await.unwrap();
        pool.close().await;
        assert!(pool.connection().await.is_err());
    }
}
