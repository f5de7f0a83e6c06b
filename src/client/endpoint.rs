//! Buda REST endpoints

use crate::error::{Result, SpreadError};

/// Logical upstream endpoints and their path templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Markets,
    Market,
    OrderBook,
    Ticker,
    Tickers,
}

impl Endpoint {
    /// Path template relative to the API base URL
    pub fn template(&self) -> &'static str {
        match self {
            Endpoint::Markets => "markets",
            Endpoint::Market => "markets/{market_id}",
            Endpoint::OrderBook => "markets/{market_id}/order_book",
            Endpoint::Ticker => "markets/{market_id}/ticker",
            Endpoint::Tickers => "tickers",
        }
    }

    /// Short name used for logging and metric labels
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Markets => "markets",
            Endpoint::Market => "market",
            Endpoint::OrderBook => "order_book",
            Endpoint::Ticker => "ticker",
            Endpoint::Tickers => "tickers",
        }
    }

    /// Names of the placeholders in the template
    pub fn placeholders(&self) -> &'static [&'static str] {
        match self {
            Endpoint::Markets | Endpoint::Tickers => &[],
            Endpoint::Market | Endpoint::OrderBook | Endpoint::Ticker => &["market_id"],
        }
    }

    /// Path segments of the template with `{name}` placeholders filled from
    /// the given path parameters. Values are returned raw and must be
    /// encoded by the caller as single segments.
    ///
    /// Fails if a placeholder is left without a value.
    pub fn segments<'a>(&self, params: &[(&str, &'a str)]) -> Result<Vec<&'a str>> {
        self.template()
            .split('/')
            .map(|segment| match placeholder_name(segment) {
                Some(placeholder) => params
                    .iter()
                    .find(|(name, _)| *name == placeholder)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| {
                        SpreadError::InvalidEndpoint(format!(
                            "missing path parameter `{}` for {:?}",
                            placeholder,
                            self.template()
                        ))
                    }),
                None => Ok(segment),
            })
            .collect()
    }
}

fn placeholder_name(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}
