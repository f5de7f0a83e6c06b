//! SQLite alert store

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::{AlertStore, NewSpreadAlert, SpreadAlert};
use crate::error::Result;

/// Alert store backed by a SQLite database
#[derive(Debug, Clone)]
pub struct SqliteAlertStore {
    pool: SqlitePool,
}

impl SqliteAlertStore {
    /// Connect to `database_url`, creating the database and schema if missing
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        info!(database_url = %database_url, "Connecting to alert store");

        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    /// Private in-memory database, kept alive by a single pinned connection
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect("sqlite::memory:")
            .await?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        initialize_schema(&pool).await?;
        info!("Alert store initialized");
        Ok(Self { pool })
    }
}

/// Create the alerts table if it does not exist
async fn initialize_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS spread_alerts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            market_id TEXT NOT NULL,
            alert_threshold REAL NOT NULL CHECK (alert_threshold >= 0.0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[async_trait]
impl AlertStore for SqliteAlertStore {
    async fn create(&self, alert: NewSpreadAlert) -> Result<SpreadAlert> {
        let result =
            sqlx::query("INSERT INTO spread_alerts (market_id, alert_threshold) VALUES (?, ?)")
                .bind(&alert.market_id)
                .bind(alert.alert_threshold)
                .execute(&self.pool)
                .await?;

        let id = result.last_insert_rowid();
        debug!(alert_id = id, market_id = %alert.market_id, "Stored spread alert");

        Ok(SpreadAlert {
            id,
            market_id: alert.market_id,
            alert_threshold: alert.alert_threshold,
        })
    }

    async fn get(&self, id: i64) -> Result<Option<SpreadAlert>> {
        let alert = sqlx::query_as::<_, SpreadAlert>(
            "SELECT id, market_id, alert_threshold FROM spread_alerts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(alert)
    }
}
