//! Root and fallback handlers

use axum::{http::StatusCode, response::Response};

use crate::web::responses::{
    METHOD_NOT_ALLOWED_DETAIL, ROOT_DETAIL, detail_response, not_found,
};

/// `GET /` points callers at the real endpoints
pub async fn index() -> Response {
    detail_response(StatusCode::NOT_FOUND, ROOT_DETAIL)
}

/// Unmatched paths, including `/lookup/` and `/remove/` without a VIN
pub async fn fallback() -> Response {
    not_found()
}

pub async fn method_not_allowed() -> Response {
    detail_response(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_DETAIL)
}
