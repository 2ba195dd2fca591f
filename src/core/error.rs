use crate::utils::constants::MAX_IMAGE_SIZE;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::types::ErrorResponse;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Missing image field, a string that is not a base64 data uri, or a bad payload
    #[error("{0}")]
    MalformedPayload(String),

    #[error("Invalid image type. Only JPG, PNG, GIF, and WebP are allowed.")]
    UnsupportedMediaType(String),

    #[error("File size too large. Maximum size is {max}MB.", max = MAX_IMAGE_SIZE / (1024 * 1024))]
    PayloadTooLarge(usize),

    /// The backend failed or timed out; carries its message
    #[error("Failed to upload image: {0}")]
    StorageUnavailable(String),
}

impl UploadError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UploadError::MalformedPayload(_)
            | UploadError::UnsupportedMediaType(_)
            | UploadError::PayloadTooLarge(_) => StatusCode::BAD_REQUEST,
            UploadError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match &self {
            UploadError::StorageUnavailable(cause) => {
                tracing::error!(cause = %cause, "upload failed in storage backend");
            }
            UploadError::UnsupportedMediaType(mime) => {
                tracing::warn!(mime = %mime, "rejected upload with unsupported media type");
            }
            UploadError::PayloadTooLarge(size) => {
                tracing::warn!(size, "rejected oversized upload");
            }
            UploadError::MalformedPayload(reason) => {
                tracing::warn!(reason = %reason, "rejected malformed upload");
            }
        }

        (self.status_code(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::UploadError;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            UploadError::MalformedPayload("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UploadError::UnsupportedMediaType("image/bmp".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UploadError::PayloadTooLarge(11 * 1024 * 1024).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UploadError::StorageUnavailable("down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            UploadError::PayloadTooLarge(0).to_string(),
            "File size too large. Maximum size is 10MB."
        );
        assert_eq!(
            UploadError::StorageUnavailable("bucket missing".into()).to_string(),
            "Failed to upload image: bucket missing"
        );
    }
}
