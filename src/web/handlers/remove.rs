use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};

use crate::web::{
    AppState,
    responses::{EvictionResponse, path_rejection},
};

/// `DELETE /remove/{vin}`, also routed for `GET`
pub async fn remove_vin(
    State(state): State<AppState>,
    vin: Result<Path<String>, PathRejection>,
) -> Response {
    let Path(vin) = match vin {
        Ok(vin) => vin,
        Err(rejection) => return path_rejection(rejection),
    };

    match state.eviction_service.evict(Some(&vin)).await {
        Ok(success) => Json(EvictionResponse { success }).into_response(),
        Err(e) => e.into_response(),
    }
}
