//! Market metadata

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::MoneyAmount;
use crate::error::Result;
use crate::parser::deserialize_opaque_string;

/// Market metadata. Fee-like fields are passed through as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub id: String,
    pub name: String,
    pub base_currency: String,
    pub quote_currency: String,
    pub minimum_order_amount: MoneyAmount,
    #[serde(deserialize_with = "deserialize_opaque_string")]
    pub taker_fee: String,
    #[serde(deserialize_with = "deserialize_opaque_string")]
    pub maker_fee: String,
    #[serde(deserialize_with = "deserialize_opaque_string")]
    pub max_orders_per_minute: String,
    #[serde(deserialize_with = "deserialize_opaque_string")]
    pub maker_discount_percentage: String,
    #[serde(deserialize_with = "deserialize_opaque_string")]
    pub taker_discount_percentage: String,
    pub disabled: bool,
}

impl Market {
    /// Parse a single market object. Unknown fields are ignored.
    pub fn from_response(data: Value) -> Result<Self> {
        Ok(serde_json::from_value(data)?)
    }
}
