use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_contact::{
    Error as ContactError, PROCESSING_FAILURE, ProcessingError, ValidationError,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Processing(#[from] ProcessingError),
}

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::Validation(e) => AppError::Validation(e),
            ContactError::Processing(e) => AppError::Processing(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Processing(e) => {
                tracing::error!(error = %e, "Contact form error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    PROCESSING_FAILURE.to_string(),
                )
            }
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}
