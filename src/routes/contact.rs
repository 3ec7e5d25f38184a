use axum::{Json, body::Bytes, extract::State};
use serde::Serialize;

use crate::{error::AppError, routes::AppState};

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
}

/// POST /api/contact
///
/// The body is decoded by the handler so undecodable payloads take the same
/// server-error path as any other processing failure.
pub async fn action(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Json<SubmitResponse>, AppError> {
    let receipt = app_state.contact.submit_json(&body).await?;

    Ok(Json(SubmitResponse {
        success: true,
        message: receipt.message,
    }))
}
