//! REST client for the Buda exchange API
//!
//! Builds URLs from endpoint templates, issues GET requests and parses the
//! JSON bodies into market data types.

use std::sync::OnceLock;

use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use super::Endpoint;
use crate::error::{Result, SpreadError};
use crate::market::{Market, OrderBook, Ticker};
use crate::metrics::{self, Outcome};

/// Client for a single unit of work.
///
/// The HTTP session is opened on first request and shared by every request
/// made through this client until [`BudaClient::close`] is called.
pub struct BudaClient {
    base_url: String,
    session: OnceLock<Client>,
}

impl BudaClient {
    /// Create a new client; `base_url` must end in `/`
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            session: OnceLock::new(),
        }
    }

    fn session(&self) -> &Client {
        self.session.get_or_init(|| {
            debug!(base_url = %self.base_url, "Opening upstream HTTP session");
            Client::new()
        })
    }

    /// Absolute URL for an endpoint. Each path parameter is percent-encoded
    /// as a single segment so it cannot reach another resource.
    pub fn build_url(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<Url> {
        let invalid =
            || SpreadError::InvalidEndpoint(format!("cannot append to {}", self.base_url));

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(endpoint.segments(params)?);

        Ok(url)
    }

    /// GET an endpoint and return its decoded JSON body.
    ///
    /// Non-2xx responses fail with [`SpreadError::Transport`] carrying the status.
    pub async fn get(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<Value> {
        let url = self.build_url(endpoint, params)?;
        debug!(endpoint = endpoint.name(), url = %url, "GET upstream");

        let response = match self.session().get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_upstream_request(endpoint.name(), Outcome::TransportError);
                warn!(url = %url, error = %e, "Upstream request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            metrics::record_upstream_request(endpoint.name(), Outcome::HttpError);
            warn!(url = %url, status = %status, "Upstream returned error status");
            return Err(SpreadError::Transport {
                status: Some(status),
                message: format!("GET {} returned {}", url, status),
            });
        }

        metrics::record_upstream_request(endpoint.name(), Outcome::Success);
        Ok(response.json::<Value>().await?)
    }

    pub async fn get_markets(&self) -> Result<Vec<Market>> {
        let body = self.get(Endpoint::Markets, &[]).await?;
        take_array(body, "markets")?
            .into_iter()
            .map(Market::from_response)
            .collect()
    }

    pub async fn get_market(&self, market_id: &str) -> Result<Market> {
        let body = self.get(Endpoint::Market, &[("market_id", market_id)]).await?;
        Market::from_response(take_field(body, "market")?)
    }

    pub async fn get_order_book(&self, market_id: &str) -> Result<OrderBook> {
        let body = self
            .get(Endpoint::OrderBook, &[("market_id", market_id)])
            .await?;
        OrderBook::from_response(take_field(body, "order_book")?)
    }

    pub async fn get_ticker(&self, market_id: &str) -> Result<Ticker> {
        let body = self.get(Endpoint::Ticker, &[("market_id", market_id)]).await?;
        Ticker::from_response(take_field(body, "ticker")?)
    }

    pub async fn get_tickers(&self) -> Result<Vec<Ticker>> {
        let body = self.get(Endpoint::Tickers, &[]).await?;
        take_array(body, "tickers")?
            .into_iter()
            .map(Ticker::from_response)
            .collect()
    }

    /// Whether the HTTP session has been opened and not yet closed
    pub fn is_open(&self) -> bool {
        self.session.get().is_some()
    }

    /// Release the HTTP session. Safe to call more than once.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            debug!(base_url = %self.base_url, "Closed upstream HTTP session");
        }
    }
}

/// Unwrap the top-level envelope key of a response body
fn take_field(body: Value, key: &str) -> Result<Value> {
    match body {
        Value::Object(mut map) => map
            .remove(key)
            .ok_or_else(|| SpreadError::ParseError(format!("missing `{}` in response", key))),
        other => Err(SpreadError::ParseError(format!(
            "expected an object with `{}`, got {}",
            key, other
        ))),
    }
}

fn take_array(body: Value, key: &str) -> Result<Vec<Value>> {
    match take_field(body, key)? {
        Value::Array(items) => Ok(items),
        other => Err(SpreadError::ParseError(format!(
            "expected `{}` to be an array, got {}",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_url() {
        let client = BudaClient::new("https://www.buda.com/api/v2/");
        assert_eq!(
            client
                .build_url(Endpoint::Ticker, &[("market_id", "BTC-CLP")])
                .unwrap()
                .as_str(),
            "https://www.buda.com/api/v2/markets/BTC-CLP/ticker"
        );
        assert_eq!(
            client.build_url(Endpoint::Markets, &[]).unwrap().as_str(),
            "https://www.buda.com/api/v2/markets"
        );
    }

    #[test]
    fn test_build_url_encodes_path_parameters() {
        let client = BudaClient::new("https://www.buda.com/api/v2/");
        let url = client
            .build_url(Endpoint::Market, &[("market_id", "BTC-CLP?x=1#y/../z")])
            .unwrap();

        assert_eq!(url.path_segments().unwrap().count(), 4);
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
        assert!(url.as_str().contains("BTC-CLP%3Fx=1%23y%2F..%2Fz"));
    }

    #[test]
    fn test_build_url_rejects_unusable_base() {
        let client = BudaClient::new("not a url");
        assert!(matches!(
            client.build_url(Endpoint::Markets, &[]),
            Err(SpreadError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_session_is_lazy_and_closeable() {
        let mut client = BudaClient::new("http://127.0.0.1:9/");
        assert!(!client.is_open());

        client.session();
        assert!(client.is_open());

        client.close();
        assert!(!client.is_open());
        client.close();
    }

    #[test]
    fn test_take_field() {
        let value = take_field(json!({"ticker": {"market_id": "x"}}), "ticker").unwrap();
        assert_eq!(value, json!({"market_id": "x"}));

        assert!(matches!(
            take_field(json!({"market": {}}), "ticker"),
            Err(SpreadError::ParseError(_))
        ));
        assert!(take_field(json!([1, 2]), "ticker").is_err());
    }

    #[test]
    fn test_take_array() {
        assert_eq!(take_array(json!({"markets": []}), "markets").unwrap().len(), 0);
        assert!(take_array(json!({"markets": {}}), "markets").is_err());
    }
}
