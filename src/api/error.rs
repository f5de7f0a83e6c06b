//! Mapping of service errors to HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};
use tracing::{error, warn};

use crate::error::SpreadError;

impl IntoResponse for SpreadError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            SpreadError::NotFound(_) | SpreadError::AlertNotFound(_) => {
                (StatusCode::NOT_FOUND, json!({ "detail": "Not found." }))
            }
            SpreadError::Validation { field, message } => {
                let mut errors = Map::new();
                errors.insert(field.to_string(), json!([message]));
                (StatusCode::BAD_REQUEST, Value::Object(errors))
            }
            SpreadError::Transport { .. } | SpreadError::ParseError(_) => {
                warn!(error = %self, "Upstream failure");
                (StatusCode::BAD_GATEWAY, json!({ "detail": self.to_string() }))
            }
            SpreadError::InvalidEndpoint(_)
            | SpreadError::Storage(_)
            | SpreadError::ConfigError(_)
            | SpreadError::MetricsError(_) => {
                error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "Internal server error." }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
