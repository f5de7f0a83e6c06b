//! Common test utilities for spread tracker integration tests
//!
//! Provides an in-process stand-in for the Buda REST API and a helper that
//! serves the public web API against it.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use spread_tracker::{api, AppState, Config, SqliteAlertStore};

/// Canned upstream data
#[derive(Default)]
pub struct FakeBuda {
    pub markets: Vec<Value>,
    pub tickers: HashMap<String, Value>,
    pub order_books: HashMap<String, Value>,
    /// Per-market delay before the ticker is returned
    pub ticker_delays: HashMap<String, Duration>,
    /// Markets whose ticker endpoint answers 500
    pub failing_tickers: Vec<String>,
    /// Answer 500 for every single-market lookup
    pub fail_market_lookup: bool,
    pub requests: AtomicUsize,
}

impl FakeBuda {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a market together with its ticker
    pub fn with_market(mut self, market_id: &str, max_bid: &str, min_ask: &str) -> Self {
        self.markets.push(market_json(market_id));
        self.tickers
            .insert(market_id.to_string(), ticker_json(market_id, max_bid, min_ask));
        self
    }

    pub fn with_order_book(mut self, market_id: &str, book: Value) -> Self {
        self.order_books.insert(market_id.to_string(), book);
        self
    }

    pub fn with_ticker_delay(mut self, market_id: &str, delay: Duration) -> Self {
        self.ticker_delays.insert(market_id.to_string(), delay);
        self
    }

    pub fn with_failing_ticker(mut self, market_id: &str) -> Self {
        self.failing_tickers.push(market_id.to_string());
        self
    }

    pub fn with_failing_market_lookup(mut self) -> Self {
        self.fail_market_lookup = true;
        self
    }

    fn find_market(&self, market_id: &str) -> Option<&Value> {
        self.markets.iter().find(|m| m["id"] == market_id)
    }
}

type Reply = (StatusCode, Json<Value>);

fn ok(body: Value) -> Reply {
    (StatusCode::OK, Json(body))
}

fn not_found() -> Reply {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": "Not found", "code": "not_found"})),
    )
}

fn server_error() -> Reply {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "Internal server error"})),
    )
}

async fn markets(State(fake): State<Arc<FakeBuda>>) -> Reply {
    fake.requests.fetch_add(1, Ordering::SeqCst);
    ok(json!({ "markets": fake.markets }))
}

async fn market(State(fake): State<Arc<FakeBuda>>, Path(market_id): Path<String>) -> Reply {
    fake.requests.fetch_add(1, Ordering::SeqCst);
    if fake.fail_market_lookup {
        return server_error();
    }
    match fake.find_market(&market_id) {
        Some(market) => ok(json!({ "market": market })),
        None => not_found(),
    }
}

async fn ticker(State(fake): State<Arc<FakeBuda>>, Path(market_id): Path<String>) -> Reply {
    fake.requests.fetch_add(1, Ordering::SeqCst);
    if let Some(delay) = fake.ticker_delays.get(&market_id) {
        tokio::time::sleep(*delay).await;
    }
    if fake.failing_tickers.contains(&market_id) {
        return server_error();
    }
    match fake.tickers.get(&market_id) {
        Some(ticker) => ok(json!({ "ticker": ticker })),
        None => not_found(),
    }
}

async fn tickers(State(fake): State<Arc<FakeBuda>>) -> Reply {
    fake.requests.fetch_add(1, Ordering::SeqCst);
    let all: Vec<&Value> = fake
        .markets
        .iter()
        .filter_map(|m| m["id"].as_str())
        .filter_map(|id| fake.tickers.get(id))
        .collect();
    ok(json!({ "tickers": all }))
}

async fn order_book(State(fake): State<Arc<FakeBuda>>, Path(market_id): Path<String>) -> Reply {
    fake.requests.fetch_add(1, Ordering::SeqCst);
    match fake.order_books.get(&market_id) {
        Some(book) => ok(json!({ "order_book": book })),
        None => not_found(),
    }
}

/// A running fake upstream, stopped on drop
pub struct MockUpstream {
    pub addr: SocketAddr,
    pub base_url: String,
    fake: Arc<FakeBuda>,
    handle: JoinHandle<()>,
}

impl MockUpstream {
    pub async fn start(fake: FakeBuda) -> Self {
        let fake = Arc::new(fake);
        let router = Router::new()
            .route("/markets", get(markets))
            .route("/markets/:market_id", get(market))
            .route("/markets/:market_id/ticker", get(ticker))
            .route("/markets/:market_id/order_book", get(order_book))
            .route("/tickers", get(tickers))
            .with_state(fake.clone());

        Self::serve(router, fake).await
    }

    /// Serve an arbitrary router, for malformed-response cases
    pub async fn start_with_router(router: Router) -> Self {
        Self::serve(router, Arc::new(FakeBuda::new())).await
    }

    async fn serve(router: Router, fake: Arc<FakeBuda>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            addr,
            base_url: format!("http://{}/", addr),
            fake,
            handle,
        }
    }

    /// Number of requests the fake has answered
    pub fn requests(&self) -> usize {
        self.fake.requests.load(Ordering::SeqCst)
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// The public web API running against `upstream` with an in-memory store
pub struct TestApp {
    pub url: String,
    handle: JoinHandle<()>,
}

impl TestApp {
    pub async fn start(upstream: &MockUpstream) -> Self {
        let store = SqliteAlertStore::in_memory().await.unwrap();
        let config = Config::with_base_url(&upstream.base_url);
        let state = Arc::new(AppState::new(&config, Arc::new(store)));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, api::router(state)).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            handle,
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn market_json(market_id: &str) -> Value {
    json!({
        "id": market_id,
        "name": format!("Market {}", market_id),
        "base_currency": "BTC",
        "quote_currency": "CLP",
        "minimum_order_amount": ["1.0", "BTC"],
        "taker_fee": "0.01",
        "maker_fee": "0.01",
        "max_orders_per_minute": "10",
        "maker_discount_percentage": "0.5",
        "taker_discount_percentage": "0.5",
        "disabled": false
    })
}

pub fn ticker_json(market_id: &str, max_bid: &str, min_ask: &str) -> Value {
    json!({
        "market_id": market_id,
        "last_price": ["879789.0", "CLP"],
        "max_bid": [max_bid, "CLP"],
        "min_ask": [min_ask, "CLP"],
        "price_variation_24h": "0.005",
        "price_variation_7d": "0.1",
        "volume": ["102.0", "BTC"]
    })
}
