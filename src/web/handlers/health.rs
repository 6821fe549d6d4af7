//! Health check handler

use axum::{Json, extract::State, response::IntoResponse};

use crate::web::{AppState, responses::HealthResponse};

/// Reports database connectivity; always answers 200
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let connected = state.database.ping().await;
    if !connected {
        tracing::warn!("Health check could not reach the database");
    }
    Json(HealthResponse::from_database_state(connected))
}
