use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};

use crate::web::{
    AppState,
    responses::{lookup_body, path_rejection},
};

/// `GET /lookup/{vin}`
pub async fn lookup_vin(
    State(state): State<AppState>,
    vin: Result<Path<String>, PathRejection>,
) -> Response {
    let Path(vin) = match vin {
        Ok(vin) => vin,
        Err(rejection) => return path_rejection(rejection),
    };

    match state.lookup_service.lookup(Some(&vin)).await {
        Ok(outcome) => Json(lookup_body(&outcome)).into_response(),
        Err(e) => e.into_response(),
    }
}
