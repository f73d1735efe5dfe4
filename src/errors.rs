use crate::services::{catalog_service::CatalogError, upload_service::UploadError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Message returned for any incomplete upload form.
pub const MISSING_FILE_DATA: &str = "Missing file data.";

/// A lightweight wrapper for general errors that keeps the message local.
///
/// `message` is what the caller sees; backend details are logged where the
/// error is converted and never serialized.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// Shortcut for a 500 Internal Server Error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    /// Shortcut for 400 Bad Request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    /// Log a failed listing and hide its detail behind `public_msg`.
    pub fn listing(err: CatalogError, public_msg: &str) -> Self {
        tracing::error!(error = %err, "listing failed");
        Self::internal(public_msg)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));

        (self.status, body).into_response()
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Validation(missing) => {
                tracing::debug!(missing, "rejecting incomplete upload");
                AppError::bad_request(MISSING_FILE_DATA)
            }
            UploadError::UploadFailure(source) => {
                tracing::error!(error = %source, "S3 upload error");
                AppError::internal("Upload failed")
            }
        }
    }
}
