//! Spread Tracker Library
//!
//! This crate fetches market data from the Buda exchange REST API, derives
//! bid/ask spreads and evaluates persisted spread alerts against them.

use std::sync::Arc;

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod market;
pub mod metrics;
pub mod parser;
pub mod services;
pub mod spread;
pub mod store;

pub use client::{BudaClient, Endpoint};
pub use crate::config::Config;
pub use error::{Result, SpreadError};
pub use market::{Market, MoneyAmount, Order, OrderBook, Ticker};
pub use services::{AlertService, MarketService, SpreadService};
pub use spread::{MarketSpread, SpreadAlertStatus, SpreadAlertTracking};
pub use store::{AlertStore, NewSpreadAlert, SpreadAlert, SqliteAlertStore};

/// Application state shared across request handlers
pub struct AppState {
    pub markets: MarketService,
    pub spreads: SpreadService,
    pub alerts: AlertService,
}

impl AppState {
    pub fn new(config: &Config, store: Arc<dyn AlertStore>) -> Self {
        let markets = MarketService::new(config.buda_api_base_url.clone());
        let spreads = SpreadService::new(config.buda_api_base_url.clone());
        let alerts = AlertService::new(markets.clone(), spreads.clone(), store);

        Self {
            markets,
            spreads,
            alerts,
        }
    }
}
