//! Alert status service

use std::sync::Arc;

use tracing::info;

use super::{MarketService, SpreadService};
use crate::error::{Result, SpreadError};
use crate::spread::{SpreadAlertStatus, SpreadAlertTracking};
use crate::store::{AlertStore, NewSpreadAlert, SpreadAlert};

const NON_EXISTING_MARKET: &str = "Cannot track spread for non-existing market";

/// Creates alerts and evaluates them against the live spread
#[derive(Clone)]
pub struct AlertService {
    markets: MarketService,
    spreads: SpreadService,
    store: Arc<dyn AlertStore>,
}

impl AlertService {
    pub fn new(markets: MarketService, spreads: SpreadService, store: Arc<dyn AlertStore>) -> Self {
        Self {
            markets,
            spreads,
            store,
        }
    }

    /// Validate and persist a new alert.
    ///
    /// The threshold is checked before the market so invalid input never
    /// reaches upstream.
    pub async fn create_alert(&self, alert: NewSpreadAlert) -> Result<SpreadAlert> {
        if !alert.alert_threshold.is_finite() || alert.alert_threshold < 0.0 {
            return Err(SpreadError::validation(
                "alert_threshold",
                "Ensure this value is greater than or equal to 0.0.",
            ));
        }

        if !self.markets.market_exists(&alert.market_id).await? {
            return Err(SpreadError::validation("market_id", NON_EXISTING_MARKET));
        }

        let created = self.store.create(alert).await?;
        info!(
            alert_id = created.id,
            market_id = %created.market_id,
            threshold = created.alert_threshold,
            "Spread alert created"
        );
        Ok(created)
    }

    /// Compare the current spread of the alert's market to its threshold
    pub async fn get_alert_status(&self, alert: &SpreadAlert) -> Result<SpreadAlertTracking> {
        let market_spread = self.spreads.get_market_spread(&alert.market_id).await?;
        let status =
            SpreadAlertStatus::from_difference(market_spread.spread_amount, alert.alert_threshold);

        Ok(SpreadAlertTracking {
            alert_id: alert.id,
            market_id: alert.market_id.clone(),
            threshold: alert.alert_threshold,
            spread: market_spread.spread_amount,
            status,
        })
    }

    /// Load a stored alert and evaluate it
    pub async fn track_alert(&self, alert_id: i64) -> Result<SpreadAlertTracking> {
        let alert = self
            .store
            .get(alert_id)
            .await?
            .ok_or(SpreadError::AlertNotFound(alert_id))?;

        self.get_alert_status(&alert).await
    }
}
