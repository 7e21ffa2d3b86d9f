use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use cdts_storage::{StorageError, UploadError};
use thiserror::Error;

use crate::models::{ErrorDetail, ErrorResponse};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid multipart body: {0}")]
    InvalidMultipart(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::InvalidArgument(argument) => {
                ApiError::InvalidArgument(format!("no {} in request", argument))
            }
            UploadError::Storage(err) => ApiError::Storage(err),
        }
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
            ApiError::InvalidMultipart(_) => (StatusCode::BAD_REQUEST, "INVALID_MULTIPART"),
            ApiError::Storage(StorageError::InvalidContainerName(..)) => {
                (StatusCode::BAD_REQUEST, "INVALID_CONTAINER")
            }
            ApiError::Storage(StorageError::InvalidBlobName(..)) => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT")
            }
            ApiError::Storage(StorageError::IoError(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR")
            }
            ApiError::Storage(_) => (StatusCode::BAD_GATEWAY, "STORAGE_FAILURE"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!("Upload failed: {}", self);
        } else {
            tracing::debug!("Rejected upload: {}", self);
        }

        let message = match &self {
            ApiError::InvalidArgument(msg) | ApiError::InvalidMultipart(msg) => msg.clone(),
            ApiError::Storage(err) => err.to_string(),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::from(UploadError::InvalidArgument("file")), StatusCode::BAD_REQUEST),
            (
                ApiError::Storage(StorageError::InvalidContainerName("..".into(), "bad".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Storage(StorageError::ContainerUnavailable("x".into(), "down".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                ApiError::Storage(StorageError::UploadError("a".into(), "reset".into())),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
