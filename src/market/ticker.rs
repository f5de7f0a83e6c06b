//! Ticker summary

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::MoneyAmount;
use crate::error::Result;
use crate::parser::deserialize_f64;

/// Current price summary of a market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub market_id: String,
    pub last_price: MoneyAmount,
    pub min_ask: MoneyAmount,
    pub max_bid: MoneyAmount,
    pub volume: MoneyAmount,
    #[serde(deserialize_with = "deserialize_f64")]
    pub price_variation_24h: f64,
    #[serde(deserialize_with = "deserialize_f64")]
    pub price_variation_7d: f64,
}

impl Ticker {
    /// Parse the `ticker` object of a ticker response
    pub fn from_response(data: Value) -> Result<Self> {
        Ok(serde_json::from_value(data)?)
    }
}
