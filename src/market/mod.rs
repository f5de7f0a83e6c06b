//! Market data module
//!
//! Typed views of the Buda market metadata, order book and ticker responses.
//! Each aggregate exposes `from_response`, the only sanctioned way to turn
//! untyped JSON into the model.

mod book;
mod info;
mod ticker;

pub use book::OrderBook;
pub use info::Market;
pub use ticker::Ticker;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SpreadError};
use crate::parser::coerce_f64;

/// An amount of money in a given currency, parsed from `[amount, currency]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(Value, String)")]
pub struct MoneyAmount {
    pub amount: f64,
    pub currency: String,
}

impl MoneyAmount {
    /// Build from the raw pair elements, coercing the amount to `f64`
    pub fn from_pair(raw_amount: &Value, currency: impl Into<String>) -> Result<Self> {
        Ok(Self {
            amount: coerce_f64(raw_amount)?,
            currency: currency.into(),
        })
    }
}

impl TryFrom<(Value, String)> for MoneyAmount {
    type Error = SpreadError;

    fn try_from((raw_amount, currency): (Value, String)) -> Result<Self> {
        Self::from_pair(&raw_amount, currency)
    }
}

/// A single price level in the order book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(Value, Value)")]
pub struct Order {
    pub price: f64,
    pub amount: f64,
}

impl TryFrom<(Value, Value)> for Order {
    type Error = SpreadError;

    fn try_from((price, amount): (Value, Value)) -> Result<Self> {
        Ok(Self {
            price: coerce_f64(&price)?,
            amount: coerce_f64(&amount)?,
        })
    }
}
