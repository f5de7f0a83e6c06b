//! HTTP handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, SpreadError};
use crate::market::{Market, OrderBook};
use crate::metrics;
use crate::parser::coerce_f64;
use crate::spread::{MarketSpread, SpreadAlertTracking};
use crate::store::{NewSpreadAlert, SpreadAlert};
use crate::AppState;

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "component": "spread-tracker",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

pub async fn render_metrics() -> Result<String> {
    metrics::render()
}

pub async fn list_markets(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Market>>> {
    Ok(Json(state.markets.get_markets().await?))
}

pub async fn retrieve_market(
    State(state): State<Arc<AppState>>,
    Path(market_id): Path<String>,
) -> Result<Json<Market>> {
    Ok(Json(state.markets.get_market(&market_id).await?))
}

pub async fn order_book(
    State(state): State<Arc<AppState>>,
    Path(market_id): Path<String>,
) -> Result<Json<OrderBook>> {
    Ok(Json(state.markets.get_order_book(&market_id).await?))
}

pub async fn all_spreads(State(state): State<Arc<AppState>>) -> Result<Json<Vec<MarketSpread>>> {
    Ok(Json(state.spreads.get_all_spreads().await?))
}

pub async fn market_spread(
    State(state): State<Arc<AppState>>,
    Path(market_id): Path<String>,
) -> Result<Json<MarketSpread>> {
    Ok(Json(state.spreads.get_market_spread(&market_id).await?))
}

const BODY_FIELD: &str = "non_field_errors";
const REQUIRED: &str = "This field is required.";

pub async fn create_alert(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<SpreadAlert>)> {
    let Json(body) =
        payload.map_err(|rejection| SpreadError::validation(BODY_FIELD, rejection.body_text()))?;
    let new_alert = new_alert_from_body(&body)?;

    debug!(market_id = %new_alert.market_id, "Creating spread alert");
    let alert = state.alerts.create_alert(new_alert).await?;
    Ok((StatusCode::CREATED, Json(alert)))
}

/// Field-level checks of an alert creation body, reported like service
/// validation errors
fn new_alert_from_body(body: &Value) -> Result<NewSpreadAlert> {
    let fields = body.as_object().ok_or_else(|| {
        SpreadError::validation(BODY_FIELD, "Invalid data. Expected a dictionary.")
    })?;

    let market_id = match fields.get("market_id") {
        None | Some(Value::Null) => return Err(SpreadError::validation("market_id", REQUIRED)),
        Some(Value::String(id)) if id.trim().is_empty() => {
            return Err(SpreadError::validation("market_id", "This field may not be blank."))
        }
        Some(Value::String(id)) => id.clone(),
        Some(_) => return Err(SpreadError::validation("market_id", "Not a valid string.")),
    };

    let alert_threshold = match fields.get("alert_threshold") {
        None | Some(Value::Null) => {
            return Err(SpreadError::validation("alert_threshold", REQUIRED))
        }
        Some(value) => coerce_f64(value).map_err(|_| {
            SpreadError::validation("alert_threshold", "A valid number is required.")
        })?,
    };

    Ok(NewSpreadAlert {
        market_id,
        alert_threshold,
    })
}

pub async fn track_alert(
    State(state): State<Arc<AppState>>,
    Path(alert_id): Path<i64>,
) -> Result<Json<SpreadAlertTracking>> {
    Ok(Json(state.alerts.track_alert(alert_id).await?))
}
