//! Market query service

use reqwest::StatusCode;
use tracing::{debug, info};

use crate::client::BudaClient;
use crate::error::{Result, SpreadError};
use crate::market::{Market, OrderBook};

/// Fetches market metadata, translating upstream 404s into `NotFound`
#[derive(Debug, Clone)]
pub struct MarketService {
    base_url: String,
}

impl MarketService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub async fn get_markets(&self) -> Result<Vec<Market>> {
        let mut client = BudaClient::new(&self.base_url);
        let result = client.get_markets().await;
        client.close();

        let markets = result?;
        info!(count = markets.len(), "Fetched markets");
        Ok(markets)
    }

    pub async fn get_market(&self, market_id: &str) -> Result<Market> {
        let mut client = BudaClient::new(&self.base_url);
        let result = client.get_market(market_id).await;
        client.close();

        result.map_err(|e| not_found_or(e, market_id))
    }

    pub async fn get_order_book(&self, market_id: &str) -> Result<OrderBook> {
        let mut client = BudaClient::new(&self.base_url);
        let result = client.get_order_book(market_id).await;
        client.close();

        result.map_err(|e| not_found_or(e, market_id))
    }

    /// `false` only when upstream reports the market as missing
    pub async fn market_exists(&self, market_id: &str) -> Result<bool> {
        match self.get_market(market_id).await {
            Ok(_) => Ok(true),
            Err(SpreadError::NotFound(_)) => {
                debug!(market_id = %market_id, "Market does not exist");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

fn not_found_or(err: SpreadError, market_id: &str) -> SpreadError {
    if err.status() == Some(StatusCode::NOT_FOUND) {
        SpreadError::NotFound(market_id.to_string())
    } else {
        err
    }
}
