//! Order book snapshot

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Order;
use crate::error::Result;

/// Asks and bids in the order upstream supplied them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub asks: Vec<Order>,
    pub bids: Vec<Order>,
}

impl OrderBook {
    /// Parse the `order_book` object of an order book response
    pub fn from_response(data: Value) -> Result<Self> {
        Ok(serde_json::from_value(data)?)
    }
}
