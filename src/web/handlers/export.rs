//! Export download handler

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::errors::AppError;
use crate::services::{EXPORT_FILE_NAME, EXPORT_MEDIA_TYPE};
use crate::web::AppState;

/// `GET /export`
///
/// Streams the parquet artifact from its scratch file. The file is removed
/// when the body stream completes or is dropped by a disconnecting client.
pub async fn export_vehicles(State(state): State<AppState>) -> Result<Response, AppError> {
    let artifact = state.export_service.export().await?;
    debug!(rows = artifact.row_count, "Streaming vehicle export");

    let headers = [
        (header::CONTENT_TYPE, EXPORT_MEDIA_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
        ),
    ];

    Ok((headers, Body::from_stream(artifact.stream)).into_response())
}
