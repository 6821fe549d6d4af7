//! HTTP response types and error mapping
//!
//! Every failure body has the shape `{"detail": "<text>"}`.

use axum::{
    Json,
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::errors::{AppError, EvictionError, LookupError, NOT_FOUND_DETAIL};
use crate::models::LookupOutcome;

/// Detail returned by `GET /`
pub const ROOT_DETAIL: &str = "Appropriate endpoints are lookup, remove, export.";

/// Detail returned for a known path requested with the wrong method
pub const METHOD_NOT_ALLOWED_DETAIL: &str = "Method Not Allowed";

const VIN_KEY: &str = "VIN";
const CACHED_KEY: &str = "Cached Result?";

/// Standard error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl ErrorDetail {
    pub fn new<S: Into<String>>(detail: S) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Body of `DELETE /remove/{vin}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvictionResponse {
    #[serde(rename = "Success")]
    pub success: bool,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
}

impl HealthResponse {
    pub fn from_database_state(connected: bool) -> Self {
        let (status, database) = if connected {
            ("healthy", "connected")
        } else {
            ("unhealthy", "disconnected")
        };
        Self {
            status: status.to_string(),
            database: database.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Render a lookup as the flat JSON object clients expect:
/// the four presented attributes plus `VIN` and `Cached Result?`.
pub fn lookup_body(outcome: &LookupOutcome) -> Value {
    let mut body = Map::new();
    for (name, value) in outcome.record.presentation() {
        body.insert(name.to_string(), Value::String(value));
    }
    body.insert(
        VIN_KEY.to_string(),
        Value::String(outcome.record.vin.to_string()),
    );
    body.insert(CACHED_KEY.to_string(), Value::Bool(outcome.was_cached));
    Value::Object(body)
}

pub fn detail_response<S: Into<String>>(status: StatusCode, detail: S) -> Response {
    (status, Json(ErrorDetail::new(detail))).into_response()
}

pub fn not_found() -> Response {
    detail_response(StatusCode::NOT_FOUND, NOT_FOUND_DETAIL)
}

/// A `{vin}` segment axum could not extract, e.g. percent-escapes that do
/// not decode to UTF-8
pub fn path_rejection(rejection: PathRejection) -> Response {
    warn!(error = %rejection, "Rejected undecodable path parameter");
    detail_response(rejection.status(), rejection.body_text())
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = match &self {
            LookupError::InvalidInput(_) | LookupError::UpstreamRejected { .. } => {
                StatusCode::NOT_FOUND
            }
            LookupError::UpstreamUnavailable { message } => {
                warn!("VIN decoder unavailable: {}", message);
                StatusCode::BAD_GATEWAY
            }
            LookupError::MalformedUpstreamData { message } => {
                error!("Malformed decoder response: {}", message);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            LookupError::Store(e) => {
                error!("Record store failure during lookup: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        detail_response(status, self.to_string())
    }
}

impl IntoResponse for EvictionError {
    fn into_response(self) -> Response {
        let status = match &self {
            EvictionError::InvalidInput(_) => StatusCode::NOT_FOUND,
            EvictionError::Store(e) => {
                error!("Record store failure during eviction: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        detail_response(status, self.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        let detail = match &self {
            AppError::Database(_) | AppError::Repository(_) => "Storage operation failed",
            AppError::Export { .. } | AppError::Io(_) => "Export failed",
            _ => "Internal Server Error",
        };
        detail_response(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }
}
