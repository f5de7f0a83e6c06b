//! Spread computation service

use futures_util::future::try_join_all;
use tracing::info;

use crate::client::BudaClient;
use crate::error::Result;
use crate::spread::MarketSpread;

/// Derives spreads from upstream tickers
#[derive(Debug, Clone)]
pub struct SpreadService {
    base_url: String,
}

impl SpreadService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub async fn get_market_spread(&self, market_id: &str) -> Result<MarketSpread> {
        let mut client = BudaClient::new(&self.base_url);
        let result = client.get_ticker(market_id).await;
        client.close();

        Ok(MarketSpread::from_ticker(&result?))
    }

    /// Spreads of every market, in the order upstream lists the markets.
    ///
    /// Tickers are fetched concurrently; the first failure fails the whole call.
    pub async fn get_all_spreads(&self) -> Result<Vec<MarketSpread>> {
        let mut client = BudaClient::new(&self.base_url);
        let result = Self::fetch_all_spreads(&client).await;
        client.close();

        let spreads = result?;
        info!(count = spreads.len(), "Computed market spreads");
        Ok(spreads)
    }

    async fn fetch_all_spreads(client: &BudaClient) -> Result<Vec<MarketSpread>> {
        let markets = client.get_markets().await?;
        let tickers =
            try_join_all(markets.iter().map(|market| client.get_ticker(&market.id))).await?;

        Ok(tickers.iter().map(MarketSpread::from_ticker).collect())
    }
}
