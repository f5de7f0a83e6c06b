//! Persisted spread alerts

mod sqlite;

pub use sqlite::SqliteAlertStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A stored spread alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SpreadAlert {
    pub id: i64,
    pub market_id: String,
    pub alert_threshold: f64,
}

/// Alert creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSpreadAlert {
    pub market_id: String,
    pub alert_threshold: f64,
}

/// Durable storage of alert thresholds
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Persist a new alert and return it with its generated id
    async fn create(&self, alert: NewSpreadAlert) -> Result<SpreadAlert>;

    async fn get(&self, id: i64) -> Result<Option<SpreadAlert>>;
}
