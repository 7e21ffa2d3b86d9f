use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "s3")]
    #[error("S3 SDK error: {0}")]
    S3SdkError(String),

    #[error("Container '{0}' is unavailable: {1}")]
    ContainerUnavailable(String, String),

    #[error("Invalid container name '{0}': {1}")]
    InvalidContainerName(String, String),

    #[error("Invalid blob name '{0}': {1}")]
    InvalidBlobName(String, String),

    #[error("Upload failed for '{0}': {1}")]
    UploadError(String, String),

    #[error("Invalid storage configuration: {0}")]
    ConfigError(String),
}

/// Errors returned by [`crate::BlobUploadService`]
#[derive(Error, Debug)]
pub enum UploadError {
    /// A required input was absent. Raised before any storage call.
    #[error("Missing required argument: {0}")]
    InvalidArgument(&'static str),

    /// Container resolution or the upload itself failed; passed through as-is.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
