use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

use crate::domain::Number;

use super::{MIGRATION_001_INITIAL, NumberStore, StoreError};

/// Connection pool tuning for [`SqliteNumberStore`].
#[derive(Debug, Clone)]
pub struct PoolOptions {
    pub max_connections: u32,
    /// How long to wait for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(3),
        }
    }
}

/// Number store persisted in a SQLite table.
#[derive(Debug, Clone)]
pub struct SqliteNumberStore {
    pool: SqlitePool,
}

impl SqliteNumberStore {
    /// Create a new store with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database.
    /// Use `?mode=rwc` in the URL to create the file if it doesn't exist.
    pub async fn connect(database_url: &str, options: &PoolOptions) -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.acquire_timeout)
            .connect(database_url)
            .await?;
        tracing::debug!(
            max_connections = options.max_connections,
            "connected to number store"
        );
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Initialize a database (connect + migrate).
    pub async fn init(database_url: &str, options: &PoolOptions) -> Result<Self, StoreError> {
        let store = Self::connect(database_url, options).await?;
        store.migrate().await?;
        Ok(store)
    }

    /// Wait for in-flight queries and close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl NumberStore for SqliteNumberStore {
    async fn append(&self, n: Number) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO nums (num) VALUES (?)")
            .bind(n)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<Number>, StoreError> {
        let rows = sqlx::query("SELECT num FROM nums")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                row.try_get::<Number, _>("num")
                    .map_err(|e| StoreError::malformed(e.to_string()))
            })
            .collect()
    }
}
