//! Spread derivation and alert status

use serde::{Deserialize, Serialize};

use crate::market::Ticker;

/// Bid/ask spread of a market, never negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSpread {
    pub market_id: String,
    pub spread_amount: f64,
}

impl MarketSpread {
    /// `min_ask - max_bid`, clamped to zero for crossed quotes
    pub fn from_ticker(ticker: &Ticker) -> Self {
        let spread_amount = ticker.min_ask.amount - ticker.max_bid.amount;

        Self {
            market_id: ticker.market_id.clone(),
            spread_amount: if spread_amount > 0.0 { spread_amount } else { 0.0 },
        }
    }
}

/// How a live spread compares to an alert threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpreadAlertStatus {
    #[serde(alias = "GRATER")]
    Greater,
    Smaller,
    Equal,
}

impl SpreadAlertStatus {
    pub fn from_difference(spread: f64, threshold: f64) -> Self {
        if spread > threshold {
            SpreadAlertStatus::Greater
        } else if spread < threshold {
            SpreadAlertStatus::Smaller
        } else {
            SpreadAlertStatus::Equal
        }
    }
}

/// Snapshot of an alert against the spread at request time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadAlertTracking {
    pub alert_id: i64,
    pub market_id: String,
    pub threshold: f64,
    pub spread: f64,
    pub status: SpreadAlertStatus,
}
