//! Web API

mod error;
mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the router with every public route
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::render_metrics))
        .route("/markets", get(handlers::list_markets))
        .route("/markets/spreads", get(handlers::all_spreads))
        .route("/markets/:market_id", get(handlers::retrieve_market))
        .route("/markets/:market_id/spread", get(handlers::market_spread))
        .route("/markets/:market_id/order_book", get(handlers::order_book))
        .route("/spread-alerts", post(handlers::create_alert))
        .route("/spread-alerts/:alert_id", get(handlers::track_alert))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
