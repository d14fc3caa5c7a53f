use crate::tracker::TrackerId;
use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Please enter a title")]
    EmptyTitle,

    #[error("Please select date & time")]
    MissingStart,

    #[error("Invalid date")]
    InvalidStart(String),

    #[error("Future dates not allowed")]
    FutureStart,

    #[error("tracker '{0}' not found")]
    NotFound(TrackerId),

    #[error("reset must be confirmed")]
    ResetNotConfirmed,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read/write data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode/decode stored value: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::NotFound(_) => Self::not_found(err.to_string()),
            _ => Self::bad_request(err.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
