//! HTTP middleware

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};

/// Response header carrying the id of the request span
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Opens a `request` span for every call so that events raised by handlers
/// and services carry the request id, then logs the outcome inside it.
pub async fn request_span_middleware(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = info_span!(
        "request",
        %request_id,
        method = %request.method(),
        uri = %request.uri(),
    );

    let mut response = async move {
        let start = Instant::now();
        let response = next.run(request).await;
        let status = response.status();
        let duration_ms = start.elapsed().as_millis();

        if status.is_client_error() || status.is_server_error() {
            warn!(status = status.as_u16(), duration_ms, "HTTP request completed with error");
        } else {
            info!(status = status.as_u16(), duration_ms, "HTTP request completed");
        }
        response
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
