use crate::SendError;

/// Client-fault problems with a submission.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid email format")]
    InvalidEmail,
}

/// Anything that went wrong after the request was accepted for processing.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("request body could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("notification could not be rendered: {0}")]
    Render(#[from] askama::Error),

    #[error(transparent)]
    Send(#[from] SendError),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

pub type Result<T> = std::result::Result<T, Error>;
